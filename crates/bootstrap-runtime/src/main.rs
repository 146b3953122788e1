//! # Beacon Bootstrap Runtime
//!
//! One-shot genesis tooling for beacon chain testnets.
//!
//! ## Run Sequence
//!
//! 1. Parse the command line (usage errors exit with 2)
//! 2. Install logging
//! 3. Run the subcommand
//! 4. Map any failure to its exit status

use std::process::ExitCode;

use bootstrap_runtime::{commands, init_logging, Cli, RuntimeError};
use clap::Parser;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level) {
        let err = RuntimeError::classify(&err);
        eprintln!("error: {err}");
        return ExitCode::from(err.exit_code());
    }

    match commands::dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err = RuntimeError::classify(&err);
            error!(exit_code = err.exit_code(), "{err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
