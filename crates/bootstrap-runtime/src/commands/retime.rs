//! `retime`: same validators, new genesis time.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bb_04_genesis_time::{inject_genesis_time, GenesisTimeInjector, SystemTimeSource, TimeSource};
use bb_05_testnet_bundle::{materialize, TestnetBundle};
use tracing::info;

use crate::cli::RetimeArgs;

pub fn run(args: &RetimeArgs) -> Result<TestnetBundle> {
    let out_dir = args.out_dir.as_deref().unwrap_or(args.bundle.as_path());
    retime(
        &args.bundle,
        out_dir,
        args.genesis_time,
        args.genesis_delay,
        Arc::new(SystemTimeSource),
    )
}

/// Load the bundle in `bundle_dir`, replace its genesis time and write the
/// result to `out_dir`. Both may be the same directory.
pub fn retime(
    bundle_dir: &Path,
    out_dir: &Path,
    genesis_time: Option<u64>,
    genesis_delay: u64,
    time_source: Arc<dyn TimeSource>,
) -> Result<TestnetBundle> {
    let config = TestnetBundle::read_config(bundle_dir)
        .with_context(|| format!("Failed to read bundle {}", bundle_dir.display()))?;
    let preset = config.preset()?;
    let bundle = TestnetBundle::load(bundle_dir, &preset)?;

    let genesis_time = GenesisTimeInjector::with_time_source(&preset, time_source)
        .with_genesis_delay(genesis_delay)
        .resolve_genesis_time(genesis_time)?;
    info!(
        previous = bundle.genesis_time,
        genesis_time,
        "Re-timing testnet bundle"
    );

    let state = inject_genesis_time(&bundle.state(&preset)?, genesis_time);
    let retimed = materialize(
        &state,
        &preset,
        &bundle.boot_addresses,
        &bundle.deposit_contract,
        out_dir,
    )
    .with_context(|| format!("Failed to write bundle to {}", out_dir.display()))?;

    Ok(retimed)
}
