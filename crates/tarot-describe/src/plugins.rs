//! Plugin descriptors, in the order the bundler applies them.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tarot_config::{ArtifactDescriptor, PathProbe, ResolvedConfiguration};

pub const STYLE_LINT_PLUGIN: &str = "stylelint-webpack-plugin";
pub const SCRIPT_LINT_PLUGIN: &str = "eslint-webpack-plugin";
pub const TYPE_CHECK_PLUGIN: &str = "fork-ts-checker-webpack-plugin";
pub const STYLE_EXTRACT_PLUGIN: &str = "extract-css-chunks-webpack-plugin";
pub const STYLE_OPTIMIZE_PLUGIN: &str = "optimize-css-assets-webpack-plugin";
pub const COPY_PLUGIN: &str = "copy-webpack-plugin";
pub const IGNORE_EMIT_PLUGIN: &str = "ignore-emit-webpack-plugin";

/// A plugin the bundler should instantiate by package name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Plugin {
    Builtin(PluginDescriptor),
    /// User-supplied artifact, passed through as resolved
    Extra(ArtifactDescriptor),
}

impl Plugin {
    fn builtin(name: &'static str, options: Value) -> Self {
        Plugin::Builtin(PluginDescriptor { name, options })
    }

    /// Package name of a built-in plugin.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Plugin::Builtin(descriptor) => Some(descriptor.name),
            Plugin::Extra(_) => None,
        }
    }
}

pub(crate) fn plugins(config: &ResolvedConfiguration, probe: &impl PathProbe) -> Vec<Plugin> {
    let options = &config.options;
    let source = &options.source_directory;
    let dev = config.mode.is_development();
    let mut plugins = Vec::new();

    if config.style_linting_enabled() {
        plugins.push(Plugin::builtin(
            STYLE_LINT_PLUGIN,
            json!({
                "configFile": options.style_lint_config_path,
                "fix": true,
                "allowEmptyInput": true,
            }),
        ));
    }

    if config.script_linting_enabled() {
        let mut lint = json!({
            "fix": true,
            "context": source,
            "cwd": source,
            "overrideConfigFile": options.lint_config_path,
            "errorOnUnmatchedPattern": false,
            "overrideConfig": { "ignorePatterns": options.lint_exclude_patterns },
        });
        if let (Some(ignore), Value::Object(map)) = (&options.lint_ignore_path, &mut lint) {
            map.insert("ignorePath".to_string(), json!(ignore));
        }
        plugins.push(Plugin::builtin(SCRIPT_LINT_PLUGIN, lint));
    }

    if config.script_toolchain_enabled() {
        plugins.push(Plugin::builtin(
            TYPE_CHECK_PLUGIN,
            json!({
                "eslint": {
                    "files": source,
                    "options": { "configFile": options.lint_config_path, "fix": true },
                },
                "typescript": {
                    "context": config.root,
                    "configFile": options.type_check_config_path,
                    "configOverwrite": {
                        "compilerOptions": options.effective_type_check_compiler_options(),
                    },
                },
            }),
        ));
    }

    plugins.push(Plugin::builtin(
        STYLE_EXTRACT_PLUGIN,
        json!({ "filename": config.style_output_name, "chunkFilename": "[id].css" }),
    ));

    let mut processor = Map::new();
    processor.insert("minimize".to_string(), Value::Bool(!dev));
    if dev {
        processor.insert("map".to_string(), json!({ "inline": false, "annotation": true }));
    }
    plugins.push(Plugin::builtin(
        STYLE_OPTIMIZE_PLUGIN,
        json!({ "cssProcessorOptions": processor }),
    ));

    if probe.exists(&source.join("index.html")) {
        plugins.push(Plugin::builtin(
            COPY_PLUGIN,
            json!({ "patterns": [{ "from": "index.html", "to": "index.html" }] }),
        ));
    }

    plugins.push(Plugin::builtin(
        IGNORE_EMIT_PLUGIN,
        json!(config.ignored_artifacts),
    ));

    plugins.extend(options.extra_artifacts.iter().cloned().map(Plugin::Extra));
    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resolve;
    use std::path::Path;
    use tarot_config::{BuildMode, EntryOptions, RawOptions};

    fn names(plugins: &[Plugin]) -> Vec<Option<&'static str>> {
        plugins.iter().map(Plugin::name).collect()
    }

    #[test]
    fn script_entry_plugin_order() {
        let project = RawOptions {
            extra_artifacts: Some(vec![ArtifactDescriptor::Opaque(json!({ "plugin": "analyzer" }))]),
            ..RawOptions::default()
        };
        let config = resolve(project, "index.ts".into(), BuildMode::Development);
        let plugins = plugins(&config, &|path: &Path| path.ends_with("index.html"));

        assert_eq!(
            names(&plugins),
            vec![
                Some(STYLE_LINT_PLUGIN),
                Some(SCRIPT_LINT_PLUGIN),
                Some(TYPE_CHECK_PLUGIN),
                Some(STYLE_EXTRACT_PLUGIN),
                Some(STYLE_OPTIMIZE_PLUGIN),
                Some(COPY_PLUGIN),
                Some(IGNORE_EMIT_PLUGIN),
                None,
            ]
        );
        assert_eq!(
            plugins[7],
            Plugin::Extra(ArtifactDescriptor::Opaque(json!({ "plugin": "analyzer" })))
        );
    }

    #[test]
    fn style_entry_skips_type_check_and_ignores_script_output() {
        let project = RawOptions {
            use_linting: Some(false),
            ..RawOptions::default()
        };
        let config = resolve(project, "styles/site.scss".into(), BuildMode::Production);
        let plugins = plugins(&config, &|_: &Path| false);

        assert_eq!(
            names(&plugins),
            vec![
                Some(STYLE_EXTRACT_PLUGIN),
                Some(STYLE_OPTIMIZE_PLUGIN),
                Some(IGNORE_EMIT_PLUGIN),
            ]
        );
        let Plugin::Builtin(ignore) = &plugins[2] else {
            panic!("expected a built-in plugin");
        };
        assert_eq!(ignore.options, json!(["app.js"]));

        let Plugin::Builtin(optimize) = &plugins[1] else {
            panic!("expected a built-in plugin");
        };
        assert_eq!(optimize.options, json!({ "cssProcessorOptions": { "minimize": true } }));
    }

    #[test]
    fn script_lint_carries_ignore_path_and_patterns() {
        let mut entry = EntryOptions::new("index.js");
        entry.overrides.lint_ignore_path = Some(".eslintignore".into());
        entry.overrides.lint_exclude_patterns = Some(vec!["vendor/**".to_string()]);
        entry.overrides.use_style_linting = Some(false);
        let config = resolve(RawOptions::default(), entry.into(), BuildMode::Development);
        let plugins = plugins(&config, &|_: &Path| false);

        let Plugin::Builtin(lint) = &plugins[0] else {
            panic!("expected a built-in plugin");
        };
        assert_eq!(lint.name, SCRIPT_LINT_PLUGIN);
        assert_eq!(lint.options["ignorePath"], json!("/work/.eslintignore"));
        assert_eq!(lint.options["overrideConfig"]["ignorePatterns"], json!(["vendor/**"]));
        assert_eq!(lint.options["context"], json!("/work/src"));
    }

    #[test]
    fn extract_uses_style_output_name() {
        let mut entry = EntryOptions::new("index.js");
        entry.style_output_name = Some("theme.scss".to_string());
        let config = resolve(RawOptions::default(), entry.into(), BuildMode::Development);
        let plugins = plugins(&config, &|_: &Path| false);

        let extract = plugins
            .iter()
            .find_map(|plugin| match plugin {
                Plugin::Builtin(descriptor) if descriptor.name == STYLE_EXTRACT_PLUGIN => Some(descriptor),
                _ => None,
            })
            .unwrap();
        assert_eq!(extract.options, json!({ "filename": "theme.css", "chunkFilename": "[id].css" }));
    }
}
