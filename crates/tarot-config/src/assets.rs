//! Tool configuration files compiled into the library.
//!
//! Resolution only points at these files. [`materialize`] writes the ones a
//! resolved configuration refers to into the project, so a built binary
//! never reads from or writes to its own source tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::defaults::{LINT_CONFIG_FILE, STYLE_LINT_CONFIG_FILE, TRANSPILE_CONFIG_FILE, TYPE_CHECK_CONFIG_FILE};
use crate::error::Result;
use crate::resolved::ResolvedOptions;

/// Per-project directory, relative to the working root, that holds the
/// bundled tool configs.
pub const ASSETS_DIR: &str = ".tarot";

const BUNDLED: &[(&str, &str)] = &[
    (LINT_CONFIG_FILE, include_str!("../assets/.eslintrc.js")),
    (STYLE_LINT_CONFIG_FILE, include_str!("../assets/stylelint.config.js")),
    (TYPE_CHECK_CONFIG_FILE, include_str!("../assets/tsconfig.json")),
    (TRANSPILE_CONFIG_FILE, include_str!("../assets/babel.config.js")),
];

/// Contents of a bundled tool config by file name.
pub fn bundled(file_name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, content)| *content)
}

/// Write every bundled tool config that `options` points at inside `dir`
/// and that does not exist yet. Existing files are left untouched.
///
/// Returns the paths that were written.
pub fn materialize(dir: &Path, options: &ResolvedOptions) -> Result<Vec<PathBuf>> {
    let tool_paths = [
        &options.lint_config_path,
        &options.style_lint_config_path,
        &options.type_check_config_path,
        &options.transpile_config_path,
    ];

    let mut written = Vec::new();
    for path in tool_paths {
        if path.parent() != Some(dir) || path.exists() {
            continue;
        }
        let Some(content) = path.file_name().and_then(|name| name.to_str()).and_then(bundled) else {
            continue;
        };
        fs::create_dir_all(dir)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), "wrote bundled tool config");
        written.push(path.clone());
    }
    Ok(written)
}
