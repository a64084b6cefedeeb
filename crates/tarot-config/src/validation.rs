//! Existence validation for explicitly supplied paths.
//!
//! Only paths the caller wrote are checked. Defaults are trusted: they point at
//! bundled tool configs written on demand or at directories the build may
//! create.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{ConfigError, Result};
use crate::options::{supplied, RawOptions};
use crate::resolved::ResolvedOptions;

/// Filesystem existence check used by validation.
///
/// A single check serves both files and directories.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl<F> PathProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Check every path-valued option the tier supplied, in a fixed order, and
/// fail on the first one that does not exist.
pub fn validate_supplied(
    raw: &RawOptions,
    resolved: &ResolvedOptions,
    probe: &impl PathProbe,
) -> Result<()> {
    let single: [(&'static str, bool, Option<&PathBuf>); 2] = [
        (
            "sourceDirectory",
            raw.source_directory.is_some(),
            Some(&resolved.source_directory),
        ),
        (
            "outputDirectory",
            raw.output_directory.is_some(),
            Some(&resolved.output_directory),
        ),
    ];
    check_paths(&single, probe)?;

    let lists: [(&'static str, bool, &[PathBuf]); 2] = [
        (
            "scopedStyleDirectories",
            supplied(&raw.scoped_style_directories).is_some(),
            resolved.scoped_style_directories.as_slice(),
        ),
        (
            "globalStyleDirectories",
            supplied(&raw.global_style_directories).is_some(),
            resolved.global_style_directories.as_slice(),
        ),
    ];
    for (option, was_supplied, dirs) in lists {
        if !was_supplied {
            continue;
        }
        if let Some(missing) = dirs.iter().find(|dir| !probe.exists(dir)) {
            return Err(ConfigError::PathNotFound {
                option,
                path: missing.clone(),
            });
        }
    }

    let files: [(&'static str, bool, Option<&PathBuf>); 5] = [
        (
            "lintConfigPath",
            raw.lint_config_path.is_some(),
            Some(&resolved.lint_config_path),
        ),
        (
            "lintIgnorePath",
            raw.lint_ignore_path.is_some(),
            resolved.lint_ignore_path.as_ref(),
        ),
        (
            "styleLintConfigPath",
            raw.style_lint_config_path.is_some(),
            Some(&resolved.style_lint_config_path),
        ),
        (
            "typeCheckConfigPath",
            raw.type_check_config_path.is_some(),
            Some(&resolved.type_check_config_path),
        ),
        (
            "transpileConfigPath",
            raw.transpile_config_path.is_some(),
            Some(&resolved.transpile_config_path),
        ),
    ];
    check_paths(&files, probe)
}

fn check_paths(checks: &[(&'static str, bool, Option<&PathBuf>)], probe: &impl PathProbe) -> Result<()> {
    for &(option, was_supplied, path) in checks {
        let (true, Some(path)) = (was_supplied, path) else {
            continue;
        };
        trace!(option, path = %path.display(), "checking supplied path");
        if !probe.exists(path) {
            return Err(ConfigError::PathNotFound {
                option,
                path: path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::Defaults;
    use crate::merge::resolve_defaults;

    fn resolved() -> ResolvedOptions {
        resolve_defaults(Path::new("/work"), &Defaults::with_assets_dir("/lib"))
    }

    #[test]
    fn defaults_are_never_probed() {
        let probe = |_: &Path| -> bool { panic!("defaults must not be checked") };
        validate_supplied(&RawOptions::default(), &resolved(), &probe).unwrap();
    }

    #[test]
    fn first_failing_option_is_reported() {
        let raw = RawOptions {
            output_directory: Some("dist".into()),
            lint_config_path: Some("missing.js".into()),
            ..RawOptions::default()
        };
        let mut options = resolved();
        options.lint_config_path = PathBuf::from("/work/missing.js");

        let err = validate_supplied(&raw, &options, &|_: &Path| false).unwrap_err();
        assert_eq!(err.option(), Some("outputDirectory"));
    }

    #[test]
    fn missing_directory_in_list_is_named() {
        let raw = RawOptions {
            global_style_directories: Some(vec!["styles".into(), "themes".into()]),
            ..RawOptions::default()
        };
        let mut options = resolved();
        options.global_style_directories = vec![
            PathBuf::from("/work/src/styles"),
            PathBuf::from("/work/src/themes"),
        ];

        let probe = |path: &Path| path.ends_with("styles");
        match validate_supplied(&raw, &options, &probe).unwrap_err() {
            ConfigError::PathNotFound { option, path } => {
                assert_eq!(option, "globalStyleDirectories");
                assert_eq!(path, PathBuf::from("/work/src/themes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_lists_count_as_unset() {
        let raw = RawOptions {
            scoped_style_directories: Some(vec![]),
            ..RawOptions::default()
        };
        validate_supplied(&raw, &resolved(), &|_: &Path| false).unwrap();
    }
}
