//! Bucketlock CLI.
//!
//! This is the main entry point for the `bucketlock` binary. It parses
//! arguments, sets up logging, dispatches to the command handler, and maps
//! the result to an exit code.

mod cli;
mod commands;

use bucketlock::exit_codes;
use cli::Cli;
use commands::Outcome;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(Outcome::Done) => ExitCode::from(exit_codes::SUCCESS as u8),
        Ok(Outcome::Refused) => ExitCode::from(exit_codes::LOCK_FAILURE as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG`. Silent by default, `--verbose` shows debug.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
