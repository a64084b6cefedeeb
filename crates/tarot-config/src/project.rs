//! The project configuration document: an `entries` mapping plus project
//! tier options at the top level.
//!
//! For file discovery, see the `discovery` module.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::{Entries, RawEntries};
use crate::error::{ConfigError, Result as ConfigResult};
use crate::options::RawOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<RawEntries>,

    #[serde(flatten)]
    pub options: RawOptions,
}

impl ProjectConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// A `Value` cannot carry duplicate keys; parse from text with
    /// [`ProjectConfig::from_json_str`] when duplicate entries must be caught.
    ///
    /// # Example
    ///
    /// ```
    /// use tarot_config::ProjectConfig;
    /// use serde_json::json;
    ///
    /// let config = ProjectConfig::from_value(json!({
    ///     "outputDirectory": "./public",
    ///     "entries": { "bundle": "index.ts" }
    /// }))
    /// .unwrap();
    /// assert_eq!(config.entries().unwrap().len(), 1);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Parse JSON text, keeping entry order and duplicate entry keys.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::invalid_value("config", format!("Invalid JSON: {e}")))
    }

    /// Parse TOML text, keeping entry order.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::invalid_value("config", format!("Invalid TOML syntax: {e}")))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Typed entries, in the order they were written.
    pub fn entries(&self) -> ConfigResult<Entries> {
        match &self.entries {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => Err(ConfigError::NoEntries),
        }
    }
}
