//! diagdoc CLI - MQTT diagnostic specification tooling.
//!
//! Provides commands for:
//! - `document`: Build a specification document (`.docx`) from markdown
//! - `diagrams`: Write diagram sources and render them to PNG
//! - `logo`: Rasterize the SVG logo for page headers
//! - `all`: Render diagrams, then build every configured document

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AllArgs, DiagramsArgs, DocumentArgs, LogoArgs};
use output::Output;

/// diagdoc - MQTT diagnostic specification tooling.
#[derive(Parser)]
#[command(name = "diagdoc", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (default: auto-discover diagdoc.toml).
    #[arg(short, long, global = true, env = "DIAGDOC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a specification document.
    Document(DocumentArgs),
    /// Generate diagram sources and PNG images.
    Diagrams(DiagramsArgs),
    /// Convert the SVG logo to a header PNG.
    Logo(LogoArgs),
    /// Render all diagrams, then build every configured document.
    All(AllArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    if let Some(path) = config {
        tracing::debug!(path = %path.display(), "Using configuration file");
    }
    let result = match cli.command {
        Commands::Document(args) => args.execute(config),
        Commands::Diagrams(args) => args.execute(config),
        Commands::Logo(args) => args.execute(config),
        Commands::All(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        #[allow(clippy::exit)]
        std::process::exit(1);
    }
}
