//! Raw option types accepted at the project and entry tiers.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options accepted at the project tier and, as overrides, at the entry tier.
///
/// Every field is optional. `None` (or an explicit `null`) means "inherit from
/// the tier below". Empty lists are treated the same as an unset list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_directory: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,

    /// Alias name → target path relative to the source directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_map: Option<IndexMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_https: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_cors: Option<bool>,

    /// Third-party module directories (under `node_modules`) to transpile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_module_paths: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_artifacts: Option<Vec<ArtifactDescriptor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_script_tooling: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_css_scoping: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_style_directories: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoped_style_directories: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_polyfills: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_linting: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_style_linting: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_script_linting: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_config_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_ignore_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_exclude_patterns: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_lint_config_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_check_config_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_check_compiler_options: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpile_config_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpile_options: Option<Map<String, Value>>,
}

impl RawOptions {
    /// Every recognised key, in declaration order.
    pub const KEYS: &'static [&'static str] = &[
        "sourceDirectory",
        "outputDirectory",
        "aliasMap",
        "useHttps",
        "allowCors",
        "extraModulePaths",
        "extraArtifacts",
        "useScriptTooling",
        "useCssScoping",
        "globalStyleDirectories",
        "scopedStyleDirectories",
        "usePolyfills",
        "useLinting",
        "useStyleLinting",
        "useScriptLinting",
        "lintConfigPath",
        "lintIgnorePath",
        "lintExcludePatterns",
        "styleLintConfigPath",
        "typeCheckConfigPath",
        "typeCheckCompilerOptions",
        "transpileConfigPath",
        "transpileOptions",
    ];

    /// Create from serde_json::Value (for programmatic config)
    pub fn from_value(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::ConfigError::invalid_value("options", e))
    }
}

impl RawOptions {
    /// Lay `upper` over `self`: every key `upper` supplies replaces the whole
    /// value below it.
    pub fn overlay(&self, upper: &RawOptions) -> crate::Result<Self> {
        let to_value = |options: &RawOptions| {
            serde_json::to_value(options).map_err(|e| crate::ConfigError::invalid_value("options", e))
        };
        let mut merged = to_value(self)?;
        if let (Value::Object(base), Value::Object(top)) = (&mut merged, to_value(upper)?) {
            base.extend(top);
        }
        Self::from_value(merged)
    }
}

/// Returns the list only when it was supplied and holds at least one item.
pub(crate) fn supplied<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|items| !items.is_empty())
}

/// An extra artifact handed to the bundler.
///
/// Copy directives are recognised so their paths can be made absolute; any
/// other value is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactDescriptor {
    Copy(CopyDirective),
    Opaque(Value),
}

/// Copy files verbatim into the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyDirective {
    pub copy: Vec<CopyPattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl ArtifactDescriptor {
    /// Convenience constructor for a single-pattern copy directive.
    pub fn copy(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        ArtifactDescriptor::Copy(CopyDirective {
            copy: vec![CopyPattern {
                from: from.into(),
                to: to.into(),
            }],
        })
    }
}
