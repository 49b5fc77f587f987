//! # poseidon CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use poseidon_cli::inspect::{run_inspect, InspectArgs};
use poseidon_cli::list::{run_list, ListArgs};
use poseidon_cli::validate::{run_validate, ValidateArgs};

/// Discover, validate, and inspect Poseidon genotype modules.
#[derive(Parser, Debug)]
#[command(name = "poseidon", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// RUST_LOG overrides this when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every module found under a root directory.
    List(ListArgs),

    /// Check that every manifest is valid and module names are unique.
    Validate(ValidateArgs),

    /// Stream each module's genotype data and print counts.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "poseidon CLI starting");

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::List(args) => run_list(args, &mut stdout),
        Commands::Validate(args) => run_validate(args, &mut stdout),
        Commands::Inspect(args) => run_inspect(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
