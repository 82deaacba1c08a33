//! `vellum filter` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::Term;
use vellum_config::{CliSettings, Config};
use vellum_markdown::{Transform, VariantFilter, VariantLabels};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the filter command.
#[derive(Args)]
pub(crate) struct FilterArgs {
    /// Markdown file to preprocess.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover vellum.toml).
    #[arg(short, long, env = "VELLUM_CONFIG")]
    config: Option<PathBuf>,

    /// Render next-variant sections.
    #[arg(long)]
    next: bool,

    /// Render current-variant sections.
    #[arg(long, conflicts_with = "next")]
    current: bool,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the filtered document tree as JSON instead of Markdown.
    #[arg(long)]
    tree: bool,
}

impl FilterArgs {
    /// Execute the filter command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, file I/O, or JSON
    /// serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            render_next: self.resolve_render_next(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let labels = VariantLabels::new(
            config.variants.next.clone(),
            config.variants.current.clone(),
        );
        let filter = VariantFilter::new(labels, config.render_next);

        let source = fs::read_to_string(&self.file)?;
        let mut document = vellum_markdown::parse(&source);
        for warning in &document.warnings {
            output.warning(&format!("{}: {warning}", self.file.display()));
        }
        filter.apply(&mut document);

        let rendered = if self.tree {
            serde_json::to_string_pretty(&document)?
        } else {
            document.to_markdown()
        };

        match &self.output {
            Some(path) => fs::write(path, rendered)?,
            None => Term::stdout().write_line(rendered.trim_end_matches('\n'))?,
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
