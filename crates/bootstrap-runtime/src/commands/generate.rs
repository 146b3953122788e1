//! `generate`: seed to bundle in one pass.

use std::sync::Arc;

use anyhow::{Context, Result};
use bb_02_key_derivation::Seed;
use bb_03_genesis_state::GenesisBuilder;
use bb_04_genesis_time::{GenesisTimeInjector, SystemTimeSource, TimeSource};
use bb_05_testnet_bundle::{materialize, TestnetBundle};
use tracing::info;

use crate::cli::GenerateArgs;
use crate::config::BootstrapConfig;

pub fn run(args: &GenerateArgs) -> Result<TestnetBundle> {
    let mut config = match &args.config {
        Some(path) => BootstrapConfig::from_file(path)?,
        None => BootstrapConfig::default(),
    };
    args.apply_to(&mut config);
    generate(&config, Arc::new(SystemTimeSource))
}

/// Validate `config`, build the genesis state and materialize the bundle.
pub fn generate(config: &BootstrapConfig, time_source: Arc<dyn TimeSource>) -> Result<TestnetBundle> {
    config.validate()?;
    let preset = config.preset();
    let seed = Seed::parse(&config.genesis.seed)?;
    let boot_addresses = config.boot_addresses()?;

    info!(
        preset = %preset.name,
        validator_count = config.genesis.validator_count,
        out_dir = %config.output.out_dir.display(),
        "Generating testnet bundle"
    );

    let genesis_time = GenesisTimeInjector::with_time_source(&preset, time_source)
        .with_genesis_delay(config.genesis.genesis_delay)
        .resolve_genesis_time(config.genesis.genesis_time)?;

    let mut builder = GenesisBuilder::new(seed).with_parallel_derivation(config.genesis.parallel);
    if let Some(hash) = config.eth1_block_hash()? {
        builder = builder.with_eth1_block_hash(hash);
    }
    let state = builder
        .build(config.genesis.validator_count, &preset, genesis_time)
        .context("Failed to build genesis state")?;

    let bundle = materialize(
        &state,
        &preset,
        &boot_addresses,
        &config.network.deposit_contract,
        &config.output.out_dir,
    )
    .with_context(|| format!("Failed to write bundle to {}", config.output.out_dir.display()))?;

    Ok(bundle)
}
