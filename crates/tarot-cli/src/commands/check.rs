//! Check command implementation.
//!
//! Validates configuration without printing it.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use tarot_config::ResolvedConfiguration;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Discover or load the project config
/// 2. Apply `TAROT_*` overrides
/// 3. Resolve every entry, which checks extensions and supplied paths
/// 4. Report a one-line summary per entry
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let configs = utils::resolve_project(&args.project)?;
    for config in &configs {
        ui::success(&summary(config));
        if !config.options.use_linting && config.options.lint_ignore_path.is_some() {
            ui::warning(&format!(
                "  {}: lintIgnorePath is set but linting is disabled",
                config.key
            ));
        }
    }

    ui::success(&format!(
        "Configuration is valid ({} {})",
        configs.len(),
        if configs.len() == 1 { "entry" } else { "entries" }
    ));
    Ok(())
}

fn summary(config: &ResolvedConfiguration) -> String {
    let (kind, output) = if config.is_style_entry {
        ("style", &config.style_output_name)
    } else {
        ("script", &config.script_output_name)
    };
    format!(
        "  {} ({kind}) {} -> {}",
        config.key,
        config.entry_path.display(),
        config.options.output_directory.join(output).display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarot_config::{BuildMode, Entries, RawOptions, Resolver};

    #[test]
    fn summary_names_kind_and_output() {
        let entries = Entries::new().with("app", "App.tsx").with("theme", "theme.scss");
        let configs = Resolver::new("/work")
            .resolve(&RawOptions::default(), &entries, BuildMode::Development)
            .unwrap();

        let app = summary(&configs[0]);
        assert!(app.contains("app (script)"));
        assert!(app.contains("/work/src/App.tsx"));
        assert!(app.ends_with("app.js"));

        let theme = summary(&configs[1]);
        assert!(theme.contains("theme (style)"));
        assert!(theme.ends_with("theme.css"));
    }
}
