//! Persisting include globs into a type-check config file.
//!
//! The resolver only computes the globs (see
//! [`ResolvedOptions::type_check_include`](crate::ResolvedOptions)); this is
//! the separate step that writes them.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Replace the `include` array of the JSON file at `path`.
///
/// Every other key keeps its value and position. Returns `false` without
/// touching the file when it already lists exactly these globs.
pub fn persist_include(path: &Path, globs: &[String]) -> Result<bool> {
    let content = fs::read_to_string(path)?;
    let mut config: Map<String, Value> = serde_json::from_str(&content)
        .map_err(|e| ConfigError::invalid_value(path.display().to_string(), format!("Invalid JSON: {e}")))?;

    let include = Value::Array(globs.iter().cloned().map(Value::String).collect());
    if config.get("include") == Some(&include) {
        debug!(path = %path.display(), "type-check include already up to date");
        return Ok(false);
    }
    config.insert("include".to_string(), include);

    fs::write(path, to_pretty_json(&config)?)?;
    debug!(path = %path.display(), ?globs, "wrote type-check include");
    Ok(true)
}

/// Four-space indented JSON with a trailing newline.
fn to_pretty_json(value: &impl Serialize) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| ConfigError::invalid_value("include", e))?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| ConfigError::invalid_value("include", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn pretty_json_uses_four_spaces() {
        let mut map = Map::new();
        map.insert("include".to_string(), Value::Array(vec![Value::String("src/**/*.ts".into())]));
        let text = to_pretty_json(&map).unwrap();
        assert_eq!(text, "{\n    \"include\": [\n        \"src/**/*.ts\"\n    ]\n}\n");
    }

    #[test]
    fn unchanged_globs_leave_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tsconfig.json");
        let original = r#"{"include":["src/**/*.ts","src/**/*.tsx"]}"#;
        fs::write(&path, original).unwrap();

        let globs = vec!["src/**/*.ts".to_string(), "src/**/*.tsx".to_string()];
        assert!(!persist_include(&path, &globs).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
