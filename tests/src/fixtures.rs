//! Shared fixtures.

use bb_02_key_derivation::Seed;
use bb_03_genesis_state::{GenesisBuilder, GenesisError};
use shared_types::{BeaconState, PresetConfig};

/// Seed used by every scenario.
pub const SCENARIO_SEED: &str = "0x4242424242424242424242424242424242424242424242424242424242424242";

/// Genesis time used by every scenario.
pub const SCENARIO_GENESIS_TIME: u64 = 1_600_000_000;

/// Deposit contract written into scenario bundles.
pub const SCENARIO_DEPOSIT_CONTRACT: &str = "0x16e82D77882A663454Ef92806b7DeCa1D394810f";

pub fn scenario_builder() -> GenesisBuilder {
    match Seed::parse(SCENARIO_SEED) {
        Ok(seed) => GenesisBuilder::new(seed),
        Err(e) => panic!("scenario seed must parse: {e}"),
    }
}

pub fn build_genesis(
    validator_count: u64,
    preset: &PresetConfig,
    genesis_time: u64,
) -> Result<BeaconState, GenesisError> {
    scenario_builder().build(validator_count, preset, genesis_time)
}
