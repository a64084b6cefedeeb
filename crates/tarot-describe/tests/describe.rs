use std::fs;

use serde_json::json;
use tarot_config::{BuildMode, ProjectConfig, Resolver};
use tarot_describe::{describe, Plugin};
use tempfile::TempDir;

fn resolve(dir: &TempDir, config: &str, mode: BuildMode) -> Vec<tarot_config::ResolvedConfiguration> {
    let config = ProjectConfig::from_json_str(config).unwrap();
    Resolver::new(dir.path())
        .resolve(&config.options, &config.entries().unwrap(), mode)
        .unwrap()
}

#[test]
fn index_html_is_copied_when_present() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    let config = r#"{ "entries": { "bundle": "index.js" } }"#;

    let without = describe(&resolve(&dir, config, BuildMode::Development)[0]);
    assert!(!without.plugins.iter().any(|p| p.name() == Some("copy-webpack-plugin")));

    fs::write(dir.path().join("src/index.html"), "<!doctype html>").unwrap();
    let with = describe(&resolve(&dir, config, BuildMode::Development)[0]);
    assert!(with.plugins.iter().any(|p| p.name() == Some("copy-webpack-plugin")));
}

#[test]
fn bundle_and_styles_describe_differently() {
    let dir = TempDir::new().unwrap();
    let resolved = resolve(
        &dir,
        r#"{
            "aliasMap": { "Data": "./data" },
            "entries": {
                "bundle": { "sourceFile": "index.js" },
                "styles": { "sourceFile": "styles/styles.scss" }
            }
        }"#,
        BuildMode::Production,
    );

    let bundle = serde_json::to_value(describe(&resolved[0])).unwrap();
    assert_eq!(bundle["output"]["filename"], json!("bundle.js"));
    assert_eq!(bundle["module"]["rules"].as_array().unwrap().len(), 3);
    assert_eq!(
        bundle["resolve"]["alias"]["Data"],
        json!(dir.path().join("src/data").to_string_lossy())
    );
    assert_eq!(bundle["resolve"]["extensions"], json!([".ts", ".tsx", ".js", ".jsx"]));

    let styles = describe(&resolved[1]);
    assert_eq!(styles.module.rules.len(), 1);
    let ignore = styles
        .plugins
        .iter()
        .find_map(|plugin| match plugin {
            Plugin::Builtin(descriptor) if descriptor.name == "ignore-emit-webpack-plugin" => Some(descriptor),
            _ => None,
        })
        .unwrap();
    assert_eq!(ignore.options, json!(["styles.js"]));
}
