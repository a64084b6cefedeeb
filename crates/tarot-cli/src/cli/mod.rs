//! Command-line interface definition for tarot.
//!
//! # Command Structure
//!
//! - `tarot resolve` - Print resolved entry configurations as JSON
//! - `tarot describe` - Print bundler build descriptions as JSON
//! - `tarot check` - Validate the configuration and summarise entries

mod commands;

use clap::Parser;

pub use commands::{CheckArgs, Command, DescribeArgs, ProjectArgs, ResolveArgs};

/// Tarot - three-tier build configuration for bundler entries
#[derive(Parser, Debug)]
#[command(
    name = "tarot",
    version,
    about = "Resolve per-entry build configurations from project defaults",
    long_about = "Tarot merges library defaults, project options and per-entry overrides\n\
                  into one validated configuration per entry, and describes the bundler\n\
                  setup (loaders, plugins, dev server) each entry needs."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    ///
    /// Only critical errors will be displayed. JSON output on stdout is
    /// unaffected.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
