//! Command handlers. Each returns `anyhow::Result`; the typed error at the
//! root of the chain decides the exit status.

pub mod generate;
pub mod inspect;
pub mod retime;

use anyhow::Result;
use bb_05_testnet_bundle::format_root;
use tracing::info;

use crate::cli::Command;

/// Run one subcommand to completion.
pub fn dispatch(command: &Command) -> Result<()> {
    match command {
        Command::Generate(args) => {
            let bundle = generate::run(args)?;
            info!(
                validator_count = bundle.validator_count,
                genesis_time = bundle.genesis_time,
                state_root = %format_root(&bundle.genesis_state_root),
                "Bundle ready"
            );
        }
        Command::Retime(args) => {
            let bundle = retime::run(args)?;
            info!(
                genesis_time = bundle.genesis_time,
                state_root = %format_root(&bundle.genesis_state_root),
                "Bundle re-timed"
            );
        }
        Command::Inspect(args) => inspect::run(args)?,
    }
    Ok(())
}
