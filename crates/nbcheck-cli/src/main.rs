//! # nbcheck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nbcheck_cli::strip::{run_strip, StripArgs};
use nbcheck_cli::validate::{run_validate, ValidateArgs};
use nbcheck_cli::validators::{run_validators, ValidatorsArgs};

/// Notebook schema checker.
///
/// Validates Jupyter notebooks against the nbformat schema and removes
/// metadata keys that violate it.
#[derive(Parser, Debug)]
#[command(name = "nbcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print machine-readable JSON reports.
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a notebook against the schema.
    Validate(ValidateArgs),

    /// Strip invalid metadata keys from a notebook.
    Strip(StripArgs),

    /// List the registered validation backends.
    Validators(ValidatorsArgs),
}

/// Exit code for failures other than an invalid notebook.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("nbcheck CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, cli.json),
        Commands::Strip(args) => run_strip(&args, cli.json),
        Commands::Validators(args) => run_validators(&args, cli.json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
