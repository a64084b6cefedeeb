//! Library-level defaults: the lowest configuration tier.

use std::path::PathBuf;

use crate::assets::ASSETS_DIR;

/// Tool configuration files shipped with the library.
pub const LINT_CONFIG_FILE: &str = ".eslintrc.js";
pub const STYLE_LINT_CONFIG_FILE: &str = "stylelint.config.js";
pub const TYPE_CHECK_CONFIG_FILE: &str = "tsconfig.json";
pub const TRANSPILE_CONFIG_FILE: &str = "babel.config.js";

/// Module prepended to script entries when polyfills are enabled.
pub const POLYFILLS_MODULE: &str = "core-js/stable";

/// Constant defaults applied before project options.
///
/// Directory defaults are relative: the source and output directories to the
/// working root, the style directory lists to the resolved source directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub global_style_directories: Vec<PathBuf>,
    pub scoped_style_directories: Vec<PathBuf>,
    pub use_https: bool,
    pub allow_cors: bool,
    pub use_script_tooling: bool,
    pub use_css_scoping: bool,
    pub use_polyfills: bool,
    pub use_linting: bool,
    pub use_style_linting: bool,
    pub use_script_linting: bool,
    /// Directory the bundled tool configuration files are written to. A
    /// relative directory resolves against the working root.
    pub assets_dir: PathBuf,
}

impl Defaults {
    /// Defaults pointing at the bundled tool configs under `<root>/.tarot`.
    pub fn bundled() -> Self {
        Self::with_assets_dir(ASSETS_DIR)
    }

    pub fn with_assets_dir(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_directory: PathBuf::from("src"),
            output_directory: PathBuf::from("dist"),
            global_style_directories: vec![PathBuf::from("styles")],
            scoped_style_directories: vec![PathBuf::from("components")],
            use_https: false,
            allow_cors: false,
            use_script_tooling: true,
            use_css_scoping: false,
            use_polyfills: false,
            use_linting: true,
            use_style_linting: true,
            use_script_linting: true,
            assets_dir: assets_dir.into(),
        }
    }

    pub fn lint_config_path(&self) -> PathBuf {
        self.assets_dir.join(LINT_CONFIG_FILE)
    }

    pub fn style_lint_config_path(&self) -> PathBuf {
        self.assets_dir.join(STYLE_LINT_CONFIG_FILE)
    }

    pub fn type_check_config_path(&self) -> PathBuf {
        self.assets_dir.join(TYPE_CHECK_CONFIG_FILE)
    }

    pub fn transpile_config_path(&self) -> PathBuf {
        self.assets_dir.join(TRANSPILE_CONFIG_FILE)
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::bundled()
    }
}
