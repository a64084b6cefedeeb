//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use tarot_config::ConfigError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report, attaching a hint where one helps.
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match &err {
        ConfigError::NotFound { .. } => miette::miette!(
            "Configuration error: {}\n\nHint: Create tarot.json (or tarot.toml) with an `entries` mapping, or pass --config <path>",
            err
        ),
        ConfigError::NoEntries => miette::miette!(
            "Configuration error: {}\n\nHint: Add at least one entry, e.g. \"entries\": {{ \"app\": \"App.tsx\" }}",
            err
        ),
        ConfigError::PathNotFound { option, .. } => miette::miette!(
            "Configuration error: {}\n\nHint: Fix or remove `{}`; relative paths resolve against the working directory",
            err,
            option
        ),
        ConfigError::InvalidExtension { .. } => miette::miette!(
            "Configuration error: {}\n\nHint: Entry sources must be script (.ts, .tsx, .js, .jsx) or style (.scss, .css) files",
            err
        ),
        _ => miette::miette!("Configuration error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_carries_hint() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound {
            root: PathBuf::from("/work"),
        }));
        let msg = report.to_string();
        assert!(msg.contains("/work"));
        assert!(msg.contains("--config"));
    }

    #[test]
    fn path_not_found_names_option_in_hint() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::PathNotFound {
            option: "typeCheckConfigPath",
            path: PathBuf::from("/work/tsconfig.json"),
        }));
        assert!(report.to_string().contains("Fix or remove `typeCheckConfigPath`"));
    }

    #[test]
    fn other_errors_pass_through() {
        let report = cli_error_to_miette(CliError::InvalidArgument("no entry 'x'".into()));
        assert_eq!(report.to_string(), "Invalid argument: no entry 'x'");
    }
}
