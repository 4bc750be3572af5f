//! helm-v2-cleanup: remove what a Helm v2 installation leaves behind.
//!
//! This is the main entry point for the CLI. It sets up logging, parses
//! arguments, dispatches to the command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod kube;
pub mod prompt;
pub mod v2;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
