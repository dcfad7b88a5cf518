//! docshelp CLI - help content from shared documents.
//!
//! Provides commands for:
//! - `route`: Print help records for one route
//! - `headings`: Print all help content grouped by heading
//! - `refresh`: Run a new extraction pass and cache it
//! - `clear-cache`: Drop the cached extraction pass

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GlobalArgs, HeadingsArgs, RouteArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// docshelp - help content from shared documents.
#[derive(Parser)]
#[command(name = "dh", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print help records for a route as JSON.
    Route(RouteArgs),
    /// Print all help content grouped by heading as JSON.
    Headings(HeadingsArgs),
    /// Run a new extraction pass and cache it.
    Refresh,
    /// Drop the cached extraction pass.
    ClearCache,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Route(args) => args.execute(&cli.global),
        Commands::Headings(args) => args.execute(&cli.global),
        Commands::Refresh => commands::refresh(&cli.global),
        Commands::ClearCache => commands::clear_cache(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
