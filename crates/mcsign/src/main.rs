//! mcsign CLI - Mastercard OAuth 1.0a request signing.
//!
//! Provides commands for:
//! - `sign`: Print the `Authorization` header for a request
//! - `send`: Sign a request and send it

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{SendArgs, SignArgs};
use output::Output;

/// mcsign - Mastercard API request signing.
#[derive(Parser)]
#[command(name = "mcsign", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the Authorization header for a request.
    Sign(SignArgs),
    /// Sign a request and send it.
    Send(SendArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Sign(args) => args.request.verbose,
        Commands::Send(args) => args.request.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sign(args) => args.execute(),
        Commands::Send(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
