//! Module rules: which loaders handle which files.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use tarot_config::ResolvedConfiguration;

const TYPESCRIPT_TEST: &str = r"\.tsx?$";
const JAVASCRIPT_TEST: &str = r"\.jsx?$";
const STYLE_TEST: &str = r"\.(scss|css)$";

const STYLE_EXTRACT_LOADER: &str = "extract-css-chunks-webpack-plugin/loader";

/// One loader rule. Script rules name a single `loader`; style rules chain
/// several under `use`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub test: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub loaders: Vec<Loader>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loader {
    pub loader: &'static str,
    pub options: Value,
}

/// Type-checking and transpiling rules, only while the script toolchain is on.
pub(crate) fn script_rules(config: &ResolvedConfiguration) -> Vec<Rule> {
    if !config.script_toolchain_enabled() {
        return Vec::new();
    }
    let options = &config.options;

    let mut include = vec![options.source_directory.clone()];
    include.extend(options.extra_module_paths.iter().cloned());

    vec![
        Rule {
            test: TYPESCRIPT_TEST,
            loader: Some("ts-loader"),
            include: Vec::new(),
            options: Some(json!({
                "configFile": options.type_check_config_path,
                "transpileOnly": true,
                "context": config.root,
                "compilerOptions": options.effective_type_check_compiler_options(),
            })),
            loaders: Vec::new(),
        },
        Rule {
            test: JAVASCRIPT_TEST,
            loader: Some("babel-loader"),
            include,
            options: Some(Value::Object(options.effective_transpile_options())),
            loaders: Vec::new(),
        },
    ]
}

/// Style rules. With CSS scoping the scoped directories get module loaders
/// and the global directories plain ones; without it the whole source tree
/// is plain.
pub(crate) fn style_rules(config: &ResolvedConfiguration) -> Vec<Rule> {
    let options = &config.options;
    let dev = config.mode.is_development();

    let rule = |include: Vec<PathBuf>, scoped: bool| Rule {
        test: STYLE_TEST,
        loader: None,
        include,
        options: None,
        loaders: style_loaders(scoped, dev),
    };

    if options.use_css_scoping {
        vec![
            rule(options.scoped_style_directories.clone(), true),
            rule(options.global_style_directories.clone(), false),
        ]
    } else {
        vec![rule(vec![options.source_directory.clone()], false)]
    }
}

fn style_loaders(scoped: bool, dev: bool) -> Vec<Loader> {
    let css_options = if scoped {
        json!({ "modules": true, "url": false, "localsConvention": "camelCaseOnly" })
    } else {
        json!({ "url": false })
    };
    let env = if dev { "dev" } else { "prod" };

    vec![
        Loader {
            loader: STYLE_EXTRACT_LOADER,
            options: json!({ "hot": dev }),
        },
        Loader {
            loader: "css-loader",
            options: css_options,
        },
        Loader {
            loader: "postcss-loader",
            options: json!({ "plugins": ["autoprefixer", "postcss-sort-media-queries"] }),
        },
        Loader {
            loader: "sass-loader",
            options: json!({
                "implementation": "sass",
                "additionalData": format!("$env: {env};"),
            }),
        },
    ]
}
