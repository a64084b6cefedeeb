//! Fully materialized configuration produced by the resolver.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::mode::BuildMode;
use crate::options::ArtifactDescriptor;

/// Every option in its concrete, absolute form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    /// Alias name → absolute target, exposed to the bundler's module resolution
    pub alias_map: IndexMap<String, PathBuf>,
    /// Alias name → `[relative target]`, in the type checker's `paths` shape
    pub type_check_paths: IndexMap<String, Vec<String>>,
    pub use_https: bool,
    pub allow_cors: bool,
    pub extra_module_paths: Vec<PathBuf>,
    pub extra_artifacts: Vec<ArtifactDescriptor>,
    pub use_script_tooling: bool,
    pub use_css_scoping: bool,
    pub global_style_directories: Vec<PathBuf>,
    pub scoped_style_directories: Vec<PathBuf>,
    pub use_polyfills: bool,
    pub use_linting: bool,
    pub use_style_linting: bool,
    pub use_script_linting: bool,
    pub lint_config_path: PathBuf,
    pub lint_ignore_path: Option<PathBuf>,
    pub lint_exclude_patterns: Vec<String>,
    pub style_lint_config_path: PathBuf,
    pub type_check_config_path: PathBuf,
    pub type_check_compiler_options: Map<String, Value>,
    pub transpile_config_path: PathBuf,
    pub transpile_options: Map<String, Value>,
    /// Include globs to persist into the bundled type-check config.
    ///
    /// Set only while the bundled config is in use; writing them is left to
    /// the type-check integration (see [`crate::tsconfig`]).
    pub type_check_include: Option<Vec<String>>,
}

impl ResolvedOptions {
    /// Transpiler options with the resolved config file injected.
    pub fn effective_transpile_options(&self) -> Map<String, Value> {
        let mut options = self.transpile_options.clone();
        options.insert(
            "configFile".to_string(),
            Value::String(self.transpile_config_path.to_string_lossy().into_owned()),
        );
        options
    }

    /// Compiler options for the type checker: derived base values overlaid by
    /// the user's passthrough keys.
    pub fn effective_type_check_compiler_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert(
            "baseUrl".to_string(),
            Value::String(self.source_directory.to_string_lossy().into_owned()),
        );
        options.insert(
            "outDir".to_string(),
            Value::String(self.output_directory.to_string_lossy().into_owned()),
        );
        let paths = self
            .type_check_paths
            .iter()
            .map(|(name, targets)| {
                let targets = targets.iter().cloned().map(Value::String).collect();
                (name.clone(), Value::Array(targets))
            })
            .collect();
        options.insert("paths".to_string(), Value::Object(paths));

        for (key, value) in &self.type_check_compiler_options {
            options.insert(key.clone(), value.clone());
        }
        options
    }
}

/// The project tier after merging with library defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseConfiguration {
    pub mode: BuildMode,
    #[serde(flatten)]
    pub options: ResolvedOptions,
}

/// One entry, merged across all three tiers and validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfiguration {
    pub key: String,
    pub mode: BuildMode,
    /// Working root the configuration was resolved against
    pub root: PathBuf,
    /// Source file relative to the source directory, without a leading `./`
    pub source_file: String,
    pub entry_path: PathBuf,
    pub is_style_entry: bool,
    pub script_output_name: String,
    pub style_output_name: String,
    /// Artifact names the bundler must not emit
    pub ignored_artifacts: Vec<String>,
    #[serde(flatten)]
    pub options: ResolvedOptions,
}

impl ResolvedConfiguration {
    /// Script rules and the forked type check only run for script entries.
    pub fn script_toolchain_enabled(&self) -> bool {
        self.options.use_script_tooling && !self.is_style_entry
    }

    pub fn style_linting_enabled(&self) -> bool {
        self.options.use_linting && self.options.use_style_linting
    }

    pub fn script_linting_enabled(&self) -> bool {
        self.options.use_linting && self.options.use_script_linting
    }
}
