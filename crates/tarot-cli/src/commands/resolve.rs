//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::commands::utils;
use crate::error::Result;
use tracing::info;

/// Execute the resolve command.
///
/// Prints a JSON array with one resolved configuration per entry, in the
/// order the entries were declared.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let configs = utils::resolve_project(&args.project)?;
    let configs = utils::select_entry(configs, args.entry.as_deref())?;
    info!(count = configs.len(), "resolved entries");
    utils::print_json(&configs)
}
