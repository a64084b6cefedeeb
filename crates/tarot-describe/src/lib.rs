//! Bundler descriptions for resolved tarot configurations.
//!
//! [`describe`] turns one [`ResolvedConfiguration`] into a serializable
//! description of everything the bundler needs for that entry: entry list,
//! output, module resolution, loader rules, plugins and dev-server settings.
//! Nothing here runs a tool; the description is data.

mod plugins;
mod rules;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tarot_config::defaults::POLYFILLS_MODULE;
use tarot_config::{BuildMode, FsProbe, PathProbe, ResolvedConfiguration};
use tracing::debug;

pub use plugins::{Plugin, PluginDescriptor};
pub use rules::{Loader, Rule};

/// Extensions the bundler resolves imports with, in lookup order.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// A bundler setting that is either a named value or switched off (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Off,
    On(&'static str),
}

impl Serialize for Toggle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Toggle::Off => serializer.serialize_bool(false),
            Toggle::On(value) => serializer.serialize_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescription {
    pub mode: BuildMode,
    /// Directory entry paths are relative to
    pub context: PathBuf,
    pub entry: Vec<String>,
    pub output: OutputDescription,
    pub resolve: ResolveDescription,
    /// Script source maps
    pub devtool: Toggle,
    pub performance: Performance,
    pub stats: &'static str,
    pub dev_server: DevServer,
    pub module: ModuleDescription,
    pub plugins: Vec<Plugin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputDescription {
    pub path: PathBuf,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveDescription {
    pub extensions: Vec<&'static str>,
    pub alias: IndexMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub hints: Toggle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServer {
    pub content_base: PathBuf,
    pub hot: bool,
    pub history_api_fallback: bool,
    pub https: bool,
    pub headers: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDescription {
    pub rules: Vec<Rule>,
}

/// Describe one resolved entry, checking the real filesystem for an
/// `index.html` to copy.
pub fn describe(config: &ResolvedConfiguration) -> BuildDescription {
    describe_with(config, &FsProbe)
}

/// Like [`describe`], with a caller-supplied existence check.
pub fn describe_with(config: &ResolvedConfiguration, probe: &impl PathProbe) -> BuildDescription {
    let options = &config.options;
    let dev = config.mode.is_development();

    let local_entry = format!("./{}", config.source_file);
    let entry = if options.use_polyfills {
        vec![POLYFILLS_MODULE.to_string(), local_entry]
    } else {
        vec![local_entry]
    };

    let mut headers = IndexMap::new();
    if options.allow_cors {
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    }

    let mut module_rules = rules::script_rules(config);
    module_rules.extend(rules::style_rules(config));

    debug!(
        key = %config.key,
        rules = module_rules.len(),
        "described entry"
    );
    BuildDescription {
        mode: config.mode,
        context: options.source_directory.clone(),
        entry,
        output: OutputDescription {
            path: options.output_directory.clone(),
            filename: config.script_output_name.clone(),
        },
        resolve: ResolveDescription {
            extensions: RESOLVE_EXTENSIONS.to_vec(),
            alias: options.alias_map.clone(),
        },
        devtool: if dev { Toggle::On("eval") } else { Toggle::Off },
        performance: Performance {
            hints: if dev { Toggle::Off } else { Toggle::On("warning") },
        },
        stats: "normal",
        dev_server: DevServer {
            content_base: options.output_directory.clone(),
            hot: dev,
            history_api_fallback: true,
            https: options.use_https,
            headers,
        },
        module: ModuleDescription { rules: module_rules },
        plugins: plugins::plugins(config, probe),
    }
}
