//! `vellum data` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use vellum_config::{CliSettings, Config};
use vellum_data::SiteData;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the data command.
#[derive(Args)]
pub(crate) struct DataArgs {
    /// Path to configuration file (default: auto-discover vellum.toml).
    #[arg(short, long, env = "VELLUM_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Emit the full data bundle as JSON.
    #[arg(long)]
    json: bool,
}

impl DataArgs {
    /// Execute the data command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or data loading fails, or if the
    /// bundle cannot be serialized.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data_dir: self.data_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let data = SiteData::load(&config.data_resolved.dir)?;

        if self.json {
            Term::stdout().write_line(&serde_json::to_string_pretty(&data)?)?;
            return Ok(());
        }

        let pinned = data.users.iter().filter(|u| u.pinned).count();
        output.highlight("Site data");
        output.info(&format!("Users: {} ({pinned} pinned)", data.users.len()));
        output.info(&format!("Sponsors: {}", data.sponsors.len()));
        output.info(&format!("Team members: {}", data.team.len()));
        output.info(&format!("Videos: {}", data.videos.len()));
        output.info(&format!("Tool categories: {}", data.tools.len()));
        output.info(&format!("Tool guides: {}", data.tool_guides.len()));

        Ok(())
    }
}
