//! Shared utilities for command implementations.
//!
//! - Path resolution against the working directory
//! - Project loading: discovery, environment layer and resolution

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result, ResultExt};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tarot_config::{ConfigDiscovery, ProjectConfig, ResolvedConfiguration, Resolver};
use tracing::debug;

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Working root for a command: `--cwd` if given, else the process directory.
pub fn project_root(args: &ProjectArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    Ok(match &args.cwd {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    })
}

/// Read the project config named by `--config`, or discover one under `root`.
pub fn load_project(args: &ProjectArgs, root: &Path) -> Result<ProjectConfig> {
    match &args.config {
        Some(path) => {
            let path = resolve_path(path, root);
            debug!(path = %path.display(), "using explicit config");
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            tarot_config::load_from(&path).with_path(&path)
        }
        None => Ok(ConfigDiscovery::new(root).load()?),
    }
}

/// Load the project, apply `TAROT_*` overrides and resolve every entry.
pub fn resolve_project(args: &ProjectArgs) -> Result<Vec<ResolvedConfiguration>> {
    let root = project_root(args)?;
    let project = load_project(args, &root)?;
    let options = tarot_config::apply_env(&project.options)?;
    let entries = project.entries.unwrap_or_default();

    let mode = args.mode();
    debug!(root = %root.display(), mode = mode.as_str(), entries = entries.len(), "resolving");
    Ok(Resolver::new(root).resolve_raw(&options, &entries, mode)?)
}

/// Keep only the entry named `key`, if one was requested.
pub fn select_entry(
    configs: Vec<ResolvedConfiguration>,
    key: Option<&str>,
) -> Result<Vec<ResolvedConfiguration>> {
    let Some(key) = key else {
        return Ok(configs);
    };
    let selected: Vec<_> = configs.into_iter().filter(|c| c.key == key).collect();
    if selected.is_empty() {
        return Err(CliError::InvalidArgument(format!("no entry named '{key}'")));
    }
    Ok(selected)
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tarot_config::BuildMode;
    use tempfile::TempDir;

    fn project_args(cwd: &Path, config: Option<&str>) -> ProjectArgs {
        ProjectArgs {
            config: config.map(PathBuf::from),
            cwd: Some(cwd.to_path_buf()),
            prod: false,
        }
    }

    #[test]
    fn test_resolve_path_absolute() {
        let cwd = Path::new("/home/user");
        assert_eq!(resolve_path(Path::new("/tmp/x"), cwd), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/home/user");
        assert_eq!(
            resolve_path(Path::new("site/tarot.json"), cwd),
            PathBuf::from("/home/user/site/tarot.json")
        );
    }

    #[test]
    fn test_get_cwd() {
        let cwd = get_cwd().unwrap();
        assert!(cwd.is_absolute());
    }

    #[test]
    fn test_load_project_explicit_config_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("conf")).unwrap();
        fs::write(
            dir.path().join("conf/site.json"),
            r#"{ "entries": { "app": "App.tsx" } }"#,
        )
        .unwrap();

        let args = project_args(dir.path(), Some("conf/site.json"));
        let project = load_project(&args, dir.path()).unwrap();
        assert_eq!(project.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_load_project_missing_explicit_config() {
        let dir = TempDir::new().unwrap();
        let args = project_args(dir.path(), Some("nope.json"));
        let err = load_project(&args, dir.path()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_select_entry() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tarot.json"),
            r#"{ "entries": { "app": "App.tsx", "styles": "styles.scss" } }"#,
        )
        .unwrap();
        let project = load_project(&project_args(dir.path(), None), dir.path()).unwrap();
        let configs = Resolver::new(dir.path())
            .resolve_raw(&project.options, project.entries.as_ref().unwrap(), BuildMode::Development)
            .unwrap();

        let styles = select_entry(configs.clone(), Some("styles")).unwrap();
        assert_eq!(styles.len(), 1);
        assert!(styles[0].is_style_entry);

        assert_eq!(select_entry(configs.clone(), None).unwrap().len(), 2);
        assert!(matches!(
            select_entry(configs, Some("admin")),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_project_checks_project_paths_before_entry_shapes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tarot.json"),
            r#"{ "lintConfigPath": "missing.js", "entries": { "app": 42 } }"#,
        )
        .unwrap();

        let err = resolve_project(&project_args(dir.path(), None)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(tarot_config::ConfigError::PathNotFound { option: "lintConfigPath", .. })
        ));
    }
}
