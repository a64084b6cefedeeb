//! Tier merging: one pure function applied twice (defaults ← project,
//! project ← entry).
//!
//! Every field is replaced atomically by the upper tier when it supplies a
//! value; maps and lists are never merged item by item.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use serde_json::Map;

use crate::defaults::Defaults;
use crate::options::{supplied, ArtifactDescriptor, CopyDirective, CopyPattern, RawOptions};
use crate::resolved::ResolvedOptions;

/// Which tier the upper options belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Project,
    Entry,
}

/// Inputs shared by both merge steps.
#[derive(Debug, Clone, Copy)]
pub struct TierContext<'a> {
    /// Working root that top-level paths resolve against
    pub root: &'a Path,
    pub defaults: &'a Defaults,
    pub tier: Tier,
}

/// Resolve `path` against `base`, normalising `.` and `..` segments.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    base.join(path).clean()
}

fn resolve_all(base: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|path| resolve_path(base, path)).collect()
}

/// Materialise the library defaults against a working root.
pub fn resolve_defaults(root: &Path, defaults: &Defaults) -> ResolvedOptions {
    let source = resolve_path(root, &defaults.source_directory);
    ResolvedOptions {
        output_directory: resolve_path(root, &defaults.output_directory),
        alias_map: IndexMap::new(),
        type_check_paths: IndexMap::new(),
        use_https: defaults.use_https,
        allow_cors: defaults.allow_cors,
        extra_module_paths: Vec::new(),
        extra_artifacts: Vec::new(),
        use_script_tooling: defaults.use_script_tooling,
        use_css_scoping: defaults.use_css_scoping,
        global_style_directories: resolve_all(&source, &defaults.global_style_directories),
        scoped_style_directories: resolve_all(&source, &defaults.scoped_style_directories),
        use_polyfills: defaults.use_polyfills,
        use_linting: defaults.use_linting,
        use_style_linting: defaults.use_style_linting,
        use_script_linting: defaults.use_script_linting,
        lint_config_path: resolve_path(root, &defaults.lint_config_path()),
        lint_ignore_path: None,
        lint_exclude_patterns: Vec::new(),
        style_lint_config_path: resolve_path(root, &defaults.style_lint_config_path()),
        type_check_config_path: resolve_path(root, &defaults.type_check_config_path()),
        type_check_compiler_options: Map::new(),
        transpile_config_path: resolve_path(root, &defaults.transpile_config_path()),
        transpile_options: Map::new(),
        type_check_include: Some(include_globs(&defaults.source_directory)),
        source_directory: source,
    }
}

/// Merge `upper` over `lower`, producing the resolved options of the upper tier.
///
/// Directory lists supplied by `upper` resolve against the upper tier's own
/// source directory. When the project tier leaves them unset they are derived
/// from the library defaults against the project's source directory; the
/// entry tier inherits them as resolved.
pub fn merge_tier(lower: &ResolvedOptions, upper: &RawOptions, ctx: TierContext<'_>) -> ResolvedOptions {
    let root = ctx.root;
    let source = upper
        .source_directory
        .as_deref()
        .map(|dir| resolve_path(root, dir))
        .unwrap_or_else(|| lower.source_directory.clone());
    let output = upper
        .output_directory
        .as_deref()
        .map(|dir| resolve_path(root, dir))
        .unwrap_or_else(|| lower.output_directory.clone());

    let style_dirs = |supplied_dirs: Option<&[PathBuf]>, default_dirs: &[PathBuf], inherited: &[PathBuf]| {
        match (supplied_dirs, ctx.tier) {
            (Some(dirs), _) => resolve_all(&source, dirs),
            (None, Tier::Project) => resolve_all(&source, default_dirs),
            (None, Tier::Entry) => inherited.to_vec(),
        }
    };
    let global_style_directories = style_dirs(
        supplied(&upper.global_style_directories),
        ctx.defaults.global_style_directories.as_slice(),
        lower.global_style_directories.as_slice(),
    );
    let scoped_style_directories = style_dirs(
        supplied(&upper.scoped_style_directories),
        ctx.defaults.scoped_style_directories.as_slice(),
        lower.scoped_style_directories.as_slice(),
    );

    let (alias_map, type_check_paths) = match &upper.alias_map {
        Some(aliases) => (
            aliases
                .iter()
                .map(|(name, target)| (name.clone(), resolve_path(&source, Path::new(target))))
                .collect(),
            type_check_paths(aliases),
        ),
        None => (lower.alias_map.clone(), lower.type_check_paths.clone()),
    };

    // Copy paths stay as written on the project tier; each entry anchors
    // them, inherited or its own, to its resolved directories.
    let extra_artifacts = supplied(&upper.extra_artifacts)
        .map(<[ArtifactDescriptor]>::to_vec)
        .unwrap_or_else(|| lower.extra_artifacts.clone());
    let extra_artifacts = match ctx.tier {
        Tier::Project => extra_artifacts,
        Tier::Entry => extra_artifacts
            .into_iter()
            .map(|artifact| absolutize_artifact(artifact, &source, &output))
            .collect(),
    };

    let type_check_include = match (&upper.type_check_config_path, ctx.tier) {
        (Some(_), _) => None,
        (None, Tier::Project) => Some(include_globs(
            upper
                .source_directory
                .as_deref()
                .unwrap_or(ctx.defaults.source_directory.as_path()),
        )),
        (None, Tier::Entry) => lower.type_check_include.clone(),
    };

    let config_path = |path: &Option<PathBuf>, inherited: &PathBuf| {
        path.as_deref()
            .map(|p| resolve_path(root, p))
            .unwrap_or_else(|| inherited.clone())
    };

    ResolvedOptions {
        alias_map,
        type_check_paths,
        use_https: upper.use_https.unwrap_or(lower.use_https),
        allow_cors: upper.allow_cors.unwrap_or(lower.allow_cors),
        extra_module_paths: supplied(&upper.extra_module_paths)
            .map(|paths| resolve_all(&root.join("node_modules"), paths))
            .unwrap_or_else(|| lower.extra_module_paths.clone()),
        extra_artifacts,
        use_script_tooling: upper.use_script_tooling.unwrap_or(lower.use_script_tooling),
        use_css_scoping: upper.use_css_scoping.unwrap_or(lower.use_css_scoping),
        global_style_directories,
        scoped_style_directories,
        use_polyfills: upper.use_polyfills.unwrap_or(lower.use_polyfills),
        use_linting: upper.use_linting.unwrap_or(lower.use_linting),
        use_style_linting: upper.use_style_linting.unwrap_or(lower.use_style_linting),
        use_script_linting: upper.use_script_linting.unwrap_or(lower.use_script_linting),
        lint_config_path: config_path(&upper.lint_config_path, &lower.lint_config_path),
        lint_ignore_path: upper
            .lint_ignore_path
            .as_deref()
            .map(|p| resolve_path(root, p))
            .or_else(|| lower.lint_ignore_path.clone()),
        lint_exclude_patterns: supplied(&upper.lint_exclude_patterns)
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| lower.lint_exclude_patterns.clone()),
        style_lint_config_path: config_path(&upper.style_lint_config_path, &lower.style_lint_config_path),
        type_check_config_path: config_path(&upper.type_check_config_path, &lower.type_check_config_path),
        type_check_compiler_options: upper
            .type_check_compiler_options
            .clone()
            .unwrap_or_else(|| lower.type_check_compiler_options.clone()),
        transpile_config_path: config_path(&upper.transpile_config_path, &lower.transpile_config_path),
        transpile_options: upper
            .transpile_options
            .clone()
            .unwrap_or_else(|| lower.transpile_options.clone()),
        type_check_include,
        source_directory: source,
        output_directory: output,
    }
}

/// Alias table in the type checker's `paths` shape: each name maps to its
/// target as written, minus a leading `./`.
pub fn type_check_paths(aliases: &IndexMap<String, String>) -> IndexMap<String, Vec<String>> {
    aliases
        .iter()
        .map(|(name, target)| (name.clone(), vec![strip_relative_prefix(target).to_string()]))
        .collect()
}

/// Source globs the type checker should include.
pub fn include_globs(source: &Path) -> Vec<String> {
    let source = source.to_string_lossy();
    let source = source.trim_end_matches(['/', '\\']);
    vec![format!("{source}/**/*.ts"), format!("{source}/**/*.tsx")]
}

/// Strip one leading `./` or `.\`.
pub fn strip_relative_prefix(path: &str) -> &str {
    path.strip_prefix("./")
        .or_else(|| path.strip_prefix(".\\"))
        .unwrap_or(path)
}

fn absolutize_artifact(artifact: ArtifactDescriptor, source: &Path, output: &Path) -> ArtifactDescriptor {
    match artifact {
        ArtifactDescriptor::Copy(CopyDirective { copy }) => ArtifactDescriptor::Copy(CopyDirective {
            copy: copy
                .into_iter()
                .map(|CopyPattern { from, to }| CopyPattern {
                    from: if from.is_absolute() { from } else { resolve_path(source, &from) },
                    to: if to.is_absolute() { to } else { resolve_path(output, &to) },
                })
                .collect(),
        }),
        opaque => opaque,
    }
}
