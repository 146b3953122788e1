//! # Bundle Loader
//!
//! Node-side reader. Every file is read and cross-checked before a
//! [`TestnetBundle`] is handed out.

use std::path::Path;

use shared_types::{BeaconState, PresetConfig};
use tracing::{debug, info};

use crate::adapters::fs::{read_file, read_text};
use crate::domain::{
    format_root, parse_root, BootAddress, BundleConfig, TestnetBundle, BOOT_ENR_FILE,
    CONFIG_FILE, DEPOSIT_CONTRACT_FILE, GENESIS_STATE_FILE,
};
use crate::errors::BundleError;

impl TestnetBundle {
    /// Read only `config.yaml` from a bundle directory.
    pub fn read_config(dir: &Path) -> Result<BundleConfig, BundleError> {
        BundleConfig::from_yaml(&read_text(&dir.join(CONFIG_FILE))?)
    }

    /// Load and verify the bundle in `dir` under `preset`.
    pub fn load(dir: &Path, preset: &PresetConfig) -> Result<Self, BundleError> {
        let config = Self::read_config(dir)?;
        config.check_preset(preset)?;

        let encoded_state = read_file(&dir.join(GENESIS_STATE_FILE))?;
        let state = BeaconState::decode(&encoded_state, preset)?;
        let genesis_state_root = state.hash_tree_root(preset)?;
        debug!(
            state_root = %format_root(&genesis_state_root),
            bytes = encoded_state.len(),
            "Decoded bundled genesis state"
        );

        verify(&config, &state, &genesis_state_root)?;

        let boot_addresses: Vec<BootAddress> =
            serde_yaml::from_str(&read_text(&dir.join(BOOT_ENR_FILE))?)?;
        let deposit_contract = read_text(&dir.join(DEPOSIT_CONTRACT_FILE))?
            .trim_end()
            .to_string();
        if deposit_contract != config.deposit_contract_address {
            return Err(BundleError::Inconsistent(format!(
                "{DEPOSIT_CONTRACT_FILE} is '{deposit_contract}' but config.yaml has '{}'",
                config.deposit_contract_address
            )));
        }

        info!(
            dir = %dir.display(),
            preset = %preset.name,
            validator_count = config.validator_count,
            genesis_time = state.genesis_time,
            "Loaded testnet bundle"
        );

        Ok(TestnetBundle {
            preset_name: preset.name,
            encoded_state,
            genesis_time: state.genesis_time,
            genesis_state_root,
            genesis_validators_root: state.genesis_validators_root,
            validator_count: config.validator_count,
            boot_addresses,
            deposit_contract,
        })
    }
}

/// Check `config.yaml` against the decoded state.
fn verify(config: &BundleConfig, state: &BeaconState, state_root: &[u8; 32]) -> Result<(), BundleError> {
    if config.genesis_time != state.genesis_time {
        return Err(BundleError::Inconsistent(format!(
            "GENESIS_TIME is {} but the state says {}",
            config.genesis_time, state.genesis_time
        )));
    }
    if parse_root(&config.genesis_state_root)? != *state_root {
        return Err(BundleError::Inconsistent(format!(
            "GENESIS_STATE_ROOT is {} but the state hashes to {}",
            config.genesis_state_root,
            format_root(state_root)
        )));
    }
    if parse_root(&config.genesis_validators_root)? != state.genesis_validators_root {
        return Err(BundleError::Inconsistent(format!(
            "GENESIS_VALIDATORS_ROOT is {} but the state has {}",
            config.genesis_validators_root,
            format_root(&state.genesis_validators_root)
        )));
    }
    if config.validator_count != state.validators.len() as u64 {
        return Err(BundleError::Inconsistent(format!(
            "VALIDATOR_COUNT is {} but the state has {} validators",
            config.validator_count,
            state.validators.len()
        )));
    }
    Ok(())
}
