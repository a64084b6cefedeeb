//! Describe command implementation.

use crate::cli::DescribeArgs;
use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::ui;
use tarot_config::ResolvedConfiguration;
use tarot_config::assets::{self, ASSETS_DIR};
use tracing::{debug, info};

/// Execute the describe command.
///
/// Resolves every entry and prints the matching bundler descriptions as a
/// JSON array. The bundled tool configs the descriptions point at are
/// written to `<root>/.tarot` when missing. With `--write-tsconfig`, the
/// type-check include globs are written into that copy as well.
pub fn execute(args: DescribeArgs) -> Result<()> {
    let configs = utils::resolve_project(&args.project)?;
    let configs = utils::select_entry(configs, args.entry.as_deref())?;

    for config in &configs {
        write_tool_configs(config)?;
        if args.write_tsconfig {
            write_tsconfig(config)?;
        }
    }

    let descriptions: Vec<_> = configs.iter().map(tarot_describe::describe).collect();
    info!(count = descriptions.len(), "described entries");
    utils::print_json(&descriptions)
}

fn write_tool_configs(config: &ResolvedConfiguration) -> Result<()> {
    let dir = config.root.join(ASSETS_DIR);
    let written = assets::materialize(&dir, &config.options)
        .context(format!("Failed to write bundled tool configs to {}", dir.display()))?;
    for path in written {
        ui::info(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

fn write_tsconfig(config: &ResolvedConfiguration) -> Result<()> {
    let Some(include) = &config.options.type_check_include else {
        debug!(entry = %config.key, "type-check config supplied, include left alone");
        return Ok(());
    };
    let path = &config.options.type_check_config_path;
    let updated = tarot_config::tsconfig::persist_include(path, include)
        .context(format!("Failed to update {}", path.display()))?;
    if updated {
        ui::info(&format!("Updated include list in {}", path.display()));
    }
    Ok(())
}
