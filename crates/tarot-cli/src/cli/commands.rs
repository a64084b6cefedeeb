use clap::{Args, Subcommand};
use std::path::PathBuf;

use tarot_config::BuildMode;

/// Available tarot subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every entry and print the configurations as JSON
    ///
    /// Merges library defaults, project options and entry overrides, checks
    /// that every path you supplied exists, and prints one fully resolved
    /// configuration per entry in the order they were written.
    Resolve(ResolveArgs),

    /// Print the bundler description of every entry as JSON
    ///
    /// Describes entry list, output, module rules, plugins and dev-server
    /// settings for each resolved entry.
    Describe(DescribeArgs),

    /// Validate the configuration without printing it
    Check(CheckArgs),
}

/// Options shared by every command that loads a project
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the config file
    ///
    /// If not provided, searches the working directory for tarot.toml,
    /// tarot.json, then a `tarot` field in package.json.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory that relative paths resolve against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Resolve for a production build instead of development
    #[arg(long)]
    pub prod: bool,
}

impl ProjectArgs {
    pub fn mode(&self) -> BuildMode {
        if self.prod {
            BuildMode::Production
        } else {
            BuildMode::Development
        }
    }
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only print the entry with this key
    #[arg(short, long, value_name = "KEY")]
    pub entry: Option<String>,
}

/// Arguments for the describe command
#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only print the entry with this key
    #[arg(short, long, value_name = "KEY")]
    pub entry: Option<String>,

    /// Write the include globs into the bundled type-check config
    ///
    /// Only has an effect while `typeCheckConfigPath` is left at its default.
    #[arg(long)]
    pub write_tsconfig: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
