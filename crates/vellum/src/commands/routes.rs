//! `vellum routes` command implementation.

use std::path::PathBuf;

use clap::Args;
use vellum_config::{CliSettings, Config};
use vellum_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover vellum.toml).
    #[arg(short, long, env = "VELLUM_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Data directory (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site fails to assemble.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            data_dir: self.data_dir,
            render_next: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = SiteBuilder::new(config).build()?;

        output.highlight("Route table");
        for route in site.routes() {
            output.info(&format!("{} -> {}", route.path, route.component));
        }
        output.success(&format!("{} routes registered", site.routes().len()));

        Ok(())
    }
}
