//! `vellum check` command implementation.

use std::path::PathBuf;

use clap::Args;
use vellum_config::{CliSettings, Config};
use vellum_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover vellum.toml).
    #[arg(short, long, env = "VELLUM_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Data directory (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Render next-variant sections.
    #[arg(long)]
    next: bool,

    /// Render current-variant sections.
    #[arg(long, conflicts_with = "next")]
    current: bool,

    /// Enable verbose output (show pipeline logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, data, or any documentation page
    /// fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let render_next = self.resolve_render_next();
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            data_dir: self.data_dir,
            render_next,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = SiteBuilder::new(config).build()?;

        output.highlight("Site check");
        match &site.config().config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults (no vellum.toml found)"),
        }
        let variant = if site.config().render_next {
            &site.config().variants.next
        } else {
            &site.config().variants.current
        };
        output.info(&format!("Rendering variant: {variant}"));
        output.info(&format!(
            "Data: {} users, {} sponsors, {} team members, {} videos, {} tool guides",
            site.data().users.len(),
            site.data().sponsors.len(),
            site.data().team.len(),
            site.data().videos.len(),
            site.data().tool_guides.len(),
        ));
        output.info(&format!("Routes: {}", site.routes().len()));

        let source_dir = &site.config().docs_resolved.source_dir;
        let mut warning_count = 0usize;
        for page in site.docs() {
            tracing::debug!(page = %page.source_path.display(), "Checking page");
            let path = source_dir.join(&page.source_path);
            let source = std::fs::read_to_string(&path)?;
            let result = site.preprocess(&source);
            for warning in &result.warnings {
                warning_count += 1;
                output.warning(&format!("{}: {warning}", page.source_path.display()));
            }
        }

        if warning_count == 0 {
            output.success(&format!(
                "{} pages checked, no warnings",
                site.docs().len()
            ));
        } else {
            output.warning(&format!(
                "{} pages checked, {warning_count} warnings",
                site.docs().len()
            ));
        }

        Ok(())
    }

    /// Resolve the render flag from --next/--current.
    fn resolve_render_next(&self) -> Option<bool> {
        self.next
            .then_some(true)
            .or_else(|| self.current.then_some(false))
    }
}
