//! Entry specifications: named units of source-to-artifact work.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::options::RawOptions;

/// One entry as written by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntrySpec {
    /// Bare source file path
    Shorthand(String),
    Full(Box<EntryOptions>),
}

/// The normalized form of an entry: a source file plus overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOptions {
    #[serde(alias = "file")]
    pub source_file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_output_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_output_name: Option<String>,

    #[serde(flatten)]
    pub overrides: RawOptions,
}

impl EntryOptions {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }
}

impl EntrySpec {
    /// Parse one entry value, reporting shape errors against its key.
    pub fn from_value(key: &str, value: Value) -> Result<Self> {
        match value {
            Value::String(file) => Ok(EntrySpec::Shorthand(file)),
            Value::Object(map) => {
                let has_source = ["sourceFile", "file"]
                    .iter()
                    .any(|field| map.get(*field).is_some_and(Value::is_string));
                if !has_source {
                    return Err(ConfigError::InvalidEntry {
                        key: key.to_string(),
                    });
                }

                if let Some(artifacts) = map.get("extraArtifacts") {
                    if !artifacts.is_array() && !artifacts.is_null() {
                        return Err(ConfigError::InvalidArtifacts {
                            key: key.to_string(),
                            value: artifacts.to_string(),
                        });
                    }
                }

                let options: EntryOptions = serde_json::from_value(Value::Object(map))
                    .map_err(|e| ConfigError::invalid_value(format!("entries.{key}"), e))?;
                Ok(EntrySpec::Full(Box::new(options)))
            }
            _ => Err(ConfigError::InvalidEntry {
                key: key.to_string(),
            }),
        }
    }

    /// Collapse the shorthand form so merge logic sees a single shape.
    pub fn into_options(self) -> EntryOptions {
        match self {
            EntrySpec::Shorthand(file) => EntryOptions::new(file),
            EntrySpec::Full(options) => *options,
        }
    }
}

impl From<EntryOptions> for EntrySpec {
    fn from(options: EntryOptions) -> Self {
        EntrySpec::Full(Box::new(options))
    }
}

impl From<&str> for EntrySpec {
    fn from(file: &str) -> Self {
        EntrySpec::Shorthand(file.to_string())
    }
}

/// The `entries` mapping exactly as written: insertion order kept and
/// duplicate keys preserved so they can be rejected during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntries(Vec<(String, Value)>);

impl RawEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.0.push((key.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// First key that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        first_duplicate(self.0.iter().map(|(key, _)| key.as_str()))
    }

    /// Parse every entry into its typed form, failing on the first bad one.
    pub fn parse(&self) -> Result<Entries> {
        self.0
            .iter()
            .map(|(key, value)| Ok((key.clone(), EntrySpec::from_value(key, value.clone())?)))
            .collect::<Result<Vec<_>>>()
            .map(Entries)
    }
}

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of entry names to entry specs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Serialize for RawEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Typed entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries(Vec<(String, EntrySpec)>);

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, spec: impl Into<EntrySpec>) -> Self {
        self.0.push((key.into(), spec.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntrySpec)> {
        self.0.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    /// First key that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        first_duplicate(self.0.iter().map(|(key, _)| key.as_str()))
    }
}

fn first_duplicate<'a>(mut keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    keys.find(|key| !seen.insert(*key))
}

impl<K: Into<String>, S: Into<EntrySpec>> FromIterator<(K, S)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Entries(
            iter.into_iter()
                .map(|(key, spec)| (key.into(), spec.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shorthand_becomes_source_file() {
        let spec = EntrySpec::from_value("bundle", json!("index.js")).unwrap();
        assert_eq!(spec.into_options(), EntryOptions::new("index.js"));
    }

    #[test]
    fn legacy_file_key_is_accepted() {
        let spec = EntrySpec::from_value("bundle", json!({ "file": "index.js" })).unwrap();
        assert_eq!(spec.into_options().source_file, "index.js");
    }

    #[test]
    fn overrides_are_flattened() {
        let spec = EntrySpec::from_value(
            "styles",
            json!({
                "sourceFile": "styles/styles.scss",
                "styleOutputName": "main.css",
                "useCssScoping": true
            }),
        )
        .unwrap();
        let options = spec.into_options();
        assert_eq!(options.style_output_name.as_deref(), Some("main.css"));
        assert_eq!(options.overrides.use_css_scoping, Some(true));
    }

    #[test]
    fn object_without_source_file_is_rejected() {
        let err = EntrySpec::from_value("app", json!({ "usePolyfills": true })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { ref key } if key == "app"));
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let err = EntrySpec::from_value("app", json!(42)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { .. }));
    }

    #[test]
    fn non_list_artifacts_are_rejected() {
        let err = EntrySpec::from_value(
            "app",
            json!({ "sourceFile": "index.ts", "extraArtifacts": { "copy": [] } }),
        )
        .unwrap_err();
        match err {
            ConfigError::InvalidArtifacts { key, value } => {
                assert_eq!(key, "app");
                assert!(value.contains("copy"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn raw_entries_keep_order_and_duplicates() {
        let raw: RawEntries =
            serde_json::from_str(r#"{ "b": "b.ts", "a": "a.ts", "b": "c.ts" }"#).unwrap();
        let keys: Vec<&str> = raw.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);

        let entries = raw.parse().unwrap();
        assert_eq!(entries.first_duplicate(), Some("b"));
    }

    #[test]
    fn entries_from_iterator() {
        let entries: Entries = [("bundle", "index.js"), ("styles", "styles.scss")]
            .into_iter()
            .collect();
        assert_eq!(entries.len(), 2);
        assert!(entries.first_duplicate().is_none());
    }
}
