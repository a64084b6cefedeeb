//! The three-tier resolver: library defaults, then project options, then
//! per-entry overrides.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::defaults::Defaults;
use crate::entry::{Entries, EntrySpec, RawEntries};
use crate::error::{ConfigError, Result};
use crate::merge::{merge_tier, resolve_defaults, resolve_path, strip_relative_prefix, Tier, TierContext};
use crate::mode::BuildMode;
use crate::options::RawOptions;
use crate::resolved::{BaseConfiguration, ResolvedConfiguration};
use crate::validation::{validate_supplied, FsProbe, PathProbe};

/// Source file extensions an entry may use.
pub const SCRIPT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];
pub const STYLE_EXTENSIONS: &[&str] = &[".scss", ".css"];

/// Resolves project and entry options against a working root.
#[derive(Debug, Clone)]
pub struct Resolver<P = FsProbe> {
    root: PathBuf,
    defaults: Defaults,
    probe: P,
}

impl Resolver<FsProbe> {
    /// Resolver using the bundled defaults and the real filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            defaults: Defaults::bundled(),
            probe: FsProbe,
        }
    }
}

impl<P: PathProbe> Resolver<P> {
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Swap the existence check, e.g. for an in-memory file set.
    pub fn with_probe<Q: PathProbe>(self, probe: Q) -> Resolver<Q> {
        Resolver {
            root: self.root,
            defaults: self.defaults,
            probe,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Merge project options over the library defaults and validate what the
    /// caller supplied.
    pub fn resolve_project(&self, raw: &RawOptions, mode: BuildMode) -> Result<BaseConfiguration> {
        let lower = resolve_defaults(&self.root, &self.defaults);
        let options = merge_tier(&lower, raw, self.context(Tier::Project));
        validate_supplied(raw, &options, &self.probe)?;

        debug!(
            source = %options.source_directory.display(),
            output = %options.output_directory.display(),
            %mode,
            "resolved project options"
        );
        Ok(BaseConfiguration { mode, options })
    }

    /// Merge one entry's overrides over the base configuration.
    pub fn resolve_entry(
        &self,
        base: &BaseConfiguration,
        key: &str,
        spec: &EntrySpec,
    ) -> Result<ResolvedConfiguration> {
        let entry = spec.clone().into_options();
        let source_file = strip_relative_prefix(&entry.source_file).to_string();

        let extension = file_extension(&source_file).unwrap_or_default();
        let is_style_entry = STYLE_EXTENSIONS.contains(&extension);
        if !is_style_entry && !SCRIPT_EXTENSIONS.contains(&extension) {
            return Err(ConfigError::InvalidExtension {
                key: key.to_string(),
                extension: extension.to_string(),
            });
        }

        let overrides = &entry.overrides;
        let mut options = merge_tier(&base.options, overrides, self.context(Tier::Entry));
        if is_style_entry && overrides.use_script_tooling.is_none() {
            options.use_script_tooling = false;
        }
        validate_supplied(overrides, &options, &self.probe)?;

        let script_output_name = output_name(entry.script_output_name.as_deref(), key, "js");
        let style_output_name = output_name(entry.style_output_name.as_deref(), key, "css");
        let ignored_artifacts = if is_style_entry {
            vec![script_output_name.clone()]
        } else {
            Vec::new()
        };
        let entry_path = resolve_path(&options.source_directory, Path::new(&source_file));

        debug!(
            key,
            entry = %entry_path.display(),
            style = is_style_entry,
            "resolved entry"
        );
        Ok(ResolvedConfiguration {
            key: key.to_string(),
            mode: base.mode,
            root: self.root.clone(),
            source_file,
            entry_path,
            is_style_entry,
            script_output_name,
            style_output_name,
            ignored_artifacts,
            options,
        })
    }

    /// Resolve every entry, in order. Fails on the first error.
    pub fn resolve(
        &self,
        project: &RawOptions,
        entries: &Entries,
        mode: BuildMode,
    ) -> Result<Vec<ResolvedConfiguration>> {
        if entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }
        if let Some(key) = entries.first_duplicate() {
            return Err(ConfigError::DuplicateEntry { key: key.to_string() });
        }

        let base = self.resolve_project(project, mode)?;
        entries
            .iter()
            .map(|(key, spec)| self.resolve_entry(&base, key, spec))
            .collect()
    }

    /// Like [`Resolver::resolve`], for entries as read from a config file.
    ///
    /// Entry shapes are parsed one at a time after the project tier has been
    /// validated, so a bad project path is reported before a bad entry.
    pub fn resolve_raw(
        &self,
        project: &RawOptions,
        entries: &RawEntries,
        mode: BuildMode,
    ) -> Result<Vec<ResolvedConfiguration>> {
        if entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }
        if let Some(key) = entries.first_duplicate() {
            return Err(ConfigError::DuplicateEntry { key: key.to_string() });
        }

        let base = self.resolve_project(project, mode)?;
        entries
            .iter()
            .map(|(key, value)| {
                let spec = EntrySpec::from_value(key, value.clone())?;
                self.resolve_entry(&base, key, &spec)
            })
            .collect()
    }

    fn context(&self, tier: Tier) -> TierContext<'_> {
        TierContext {
            root: &self.root,
            defaults: &self.defaults,
            tier,
        }
    }
}

/// Trailing `.ext` of a file name, dot included. Only ASCII letters and
/// digits count as an extension.
pub fn file_extension(file: &str) -> Option<&str> {
    let dot = file.rfind('.')?;
    let suffix = &file[dot + 1..];
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some(&file[dot..])
}

fn output_name(name: Option<&str>, key: &str, extension: &str) -> String {
    match name {
        Some(name) => {
            let stem = match file_extension(name) {
                Some(ext) => &name[..name.len() - ext.len()],
                None => name,
            };
            format!("{stem}.{extension}")
        }
        None => format!("{key}.{extension}"),
    }
}
