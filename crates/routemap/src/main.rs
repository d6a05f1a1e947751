//! routemap CLI - Route manifest inspector.
//!
//! Provides commands for:
//! - `resolve`: Resolve request paths against the route manifest
//! - `routes`: Print the route tree or the list of pages
//! - `check`: Validate the route manifest

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, RoutesArgs};
use output::Output;

/// routemap - Route manifest inspector.
#[derive(Parser)]
#[command(name = "routemap", version, about)]
struct Cli {
    /// Enable verbose output (manifest loading and resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve request paths to components.
    Resolve(ResolveArgs),
    /// Print the route table.
    Routes(RoutesArgs),
    /// Validate the route manifest.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
