//! File-based config discovery for CLI use
//!
//! Handles finding and loading tarot configuration files from the filesystem,
//! and layering `TAROT_*` environment variables over the project options.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Env;
use figment::value::{Uncased, UncasedStr};
use figment::Figment;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::options::RawOptions;
use crate::project::ProjectConfig;

/// Prefix of environment variables that override project options.
pub const ENV_PREFIX: &str = "TAROT_";

/// Dedicated config files, in lookup order.
pub const CONFIG_FILES: &[&str] = &["tarot.toml", "tarot.json"];

/// File-based configuration discovery
///
/// Searches for tarot configuration files in conventional locations and loads them.
/// Library users can build a [`ProjectConfig`] directly instead.
///
/// # Example
///
/// ```no_run
/// use tarot_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. tarot.toml
    /// 2. tarot.json
    /// 3. package.json (non-null `tarot` field)
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(path) = CONFIG_FILES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
        {
            return Some(path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        parsed
            .get("tarot")
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ProjectConfig> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound {
            root: self.root.clone(),
        })?;
        load_from(&path)
    }
}

/// Load config from a specific file path.
///
/// The format follows the file name: `package.json` reads its `tarot` field,
/// `.toml` files are TOML and everything else is JSON.
pub fn load_from(path: &Path) -> Result<ProjectConfig> {
    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return load_from_package_json(&content);
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => ProjectConfig::from_toml_str(&content),
        _ => ProjectConfig::from_json_str(&content),
    }
}

fn load_from_package_json(content: &str) -> Result<ProjectConfig> {
    #[derive(Deserialize)]
    struct Manifest {
        #[serde(default)]
        tarot: Option<ProjectConfig>,
    }

    let manifest: Manifest = serde_json::from_str(content)
        .map_err(|e| ConfigError::invalid_value("package.json", format!("Invalid JSON: {e}")))?;
    manifest
        .tarot
        .ok_or_else(|| ConfigError::invalid_value("tarot", "Add a non-null 'tarot' field to your package.json"))
}

/// Project options supplied through `TAROT_*` variables.
///
/// `TAROT_OUTPUT_DIRECTORY` maps to `outputDirectory`; variables that name no
/// known option are ignored.
pub fn env_overrides() -> Result<RawOptions> {
    Figment::from(Env::prefixed(ENV_PREFIX).filter_map(env_key).lowercase(false))
        .extract()
        .map_err(|e| ConfigError::invalid_value("environment", e))
}

/// Lay the environment layer over options read from a file.
pub fn apply_env(options: &RawOptions) -> Result<RawOptions> {
    let overrides = env_overrides()?;
    if overrides == RawOptions::default() {
        return Ok(options.clone());
    }
    debug!(?overrides, "applying environment overrides");
    options.overlay(&overrides)
}

fn env_key(key: &UncasedStr) -> Option<Uncased<'_>> {
    let name = snake_to_camel(key.as_str());
    let known = RawOptions::KEYS.contains(&name.as_str());
    known.then(|| Uncased::from_owned(name))
}

fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, part) in key.split('_').filter(|part| !part.is_empty()).enumerate() {
        let part = part.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Discover and load config from current directory (convenience function)
pub fn discover() -> Result<ProjectConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn toml_wins_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tarot.json"), r#"{ "entries": { "a": "a.ts" } }"#).unwrap();
        fs::write(dir.path().join("tarot.toml"), "[entries]\na = \"a.ts\"\n").unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), dir.path().join("tarot.toml"));
    }

    #[test]
    fn package_json_without_field_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "demo", "tarot": null }"#).unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
        assert!(matches!(discovery.load(), Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn loads_from_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "name": "test",
                "tarot": {
                    "usePolyfills": true,
                    "entries": { "bundle": "index.js" }
                }
            }"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.options.use_polyfills, Some(true));
        assert_eq!(config.entries().unwrap().len(), 1);
    }

    #[test]
    fn snake_case_maps_to_option_keys() {
        assert_eq!(snake_to_camel("output_directory"), "outputDirectory");
        assert_eq!(snake_to_camel("USE_CSS_SCOPING"), "useCssScoping");
        assert_eq!(snake_to_camel("allow_cors"), "allowCors");
    }
}
