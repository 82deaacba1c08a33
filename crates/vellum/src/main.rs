//! Vellum CLI - documentation-site content engine.
//!
//! Provides commands for:
//! - `check`: Validate config, data, and docs; report pipeline warnings
//! - `filter`: Preprocess a single Markdown document
//! - `routes`: Print the assembled route table
//! - `data`: Summarize the loaded site data bundle

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DataArgs, FilterArgs, RoutesArgs};
use output::Output;

/// Vellum - documentation-site content engine.
#[derive(Parser)]
#[command(name = "vellum", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration, data, and documentation sources.
    Check(CheckArgs),
    /// Preprocess a single Markdown document.
    Filter(FilterArgs),
    /// Print the assembled route table.
    Routes(RoutesArgs),
    /// Summarize loaded site data.
    Data(DataArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for the check command
    let verbose = matches!(&cli.command, Commands::Check(args) if args.verbose);

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Filter(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Data(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
