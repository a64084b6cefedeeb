//! Error types for configuration loading and resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Configuration shape errors
    #[error("no entries configured")]
    NoEntries,

    #[error("invalid entry '{key}': expected a source file string or an object with a `sourceFile` field")]
    InvalidEntry { key: String },

    #[error("invalid file extension \"{extension}\" in entry '{key}' (expected one of .ts, .tsx, .js, .jsx, .scss, .css)")]
    InvalidExtension { key: String, extension: String },

    #[error("invalid extraArtifacts in entry '{key}': expected a list, got {value}")]
    InvalidArtifacts { key: String, value: String },

    #[error("duplicate entry key '{key}'")]
    DuplicateEntry { key: String },

    #[error("invalid config value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Path existence errors
    #[error("you provided a {option} option, but nothing exists at {}", .path.display())]
    PathNotFound { option: &'static str, path: PathBuf },

    // Config discovery errors
    #[error("config not found in {}", .root.display())]
    NotFound { root: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, hint: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: Some(hint.to_string()),
        }
    }

    /// Name of the option responsible for a path existence failure.
    pub fn option(&self) -> Option<&'static str> {
        match self {
            ConfigError::PathNotFound { option, .. } => Some(option),
            _ => None,
        }
    }
}
