use std::fs;

use serde_json::Value;
use tarot_config::tsconfig::persist_include;
use tarot_config::{BuildMode, RawOptions, Resolver};
use tempfile::TempDir;

#[test]
fn persisting_include_keeps_other_keys_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsconfig.json");
    fs::write(
        &path,
        r#"{"compilerOptions":{"strict":true},"include":["old/**/*.ts"],"exclude":["node_modules"]}"#,
    )
    .unwrap();

    let globs = vec!["./app/**/*.ts".to_string(), "./app/**/*.tsx".to_string()];
    assert!(persist_include(&path, &globs).unwrap());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"compilerOptions\""));
    let value: Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["compilerOptions", "include", "exclude"]);
    assert_eq!(value["include"], serde_json::json!(globs));

    // Second write is a no-op.
    assert!(!persist_include(&path, &globs).unwrap());
}

#[test]
fn resolved_globs_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("app")).unwrap();
    let path = dir.path().join("tsconfig.json");
    fs::write(&path, "{}").unwrap();

    let raw = RawOptions {
        source_directory: Some("./app".into()),
        ..RawOptions::default()
    };
    let base = Resolver::new(dir.path())
        .resolve_project(&raw, BuildMode::Development)
        .unwrap();
    let globs = base.options.type_check_include.unwrap();
    assert!(persist_include(&path, &globs).unwrap());

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["include"], serde_json::json!(["./app/**/*.ts", "./app/**/*.tsx"]));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = persist_include(&dir.path().join("nope.json"), &[]).unwrap_err();
    assert!(matches!(err, tarot_config::ConfigError::Io(_)));
}
