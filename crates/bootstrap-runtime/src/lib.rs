//! # Bootstrap Runtime Library
//!
//! Wires the pipeline stages behind the `bootstrap-runtime` binary and
//! exposes them for integration tests.
//!
//! ```text
//! seed ─→ keys ─→ validators ─→ BeaconState ─→ genesis.ssz ─→ bundle dir
//!        (bb-02)   (bb-03)       (bb-04 time)    (bb-01)       (bb-05)
//! ```
//!
//! ## Modules
//!
//! - `cli` - clap argument definitions
//! - `config` - `BootstrapConfig`, YAML loading and validation
//! - `commands` - `generate`, `retime` and `inspect`
//! - `errors` - exit status classification

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use cli::{Cli, Command};
pub use config::{BootstrapConfig, ConfigError};
pub use errors::RuntimeError;

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| ConfigError::Invalid(format!("log level '{level}': {e}")))?,
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
