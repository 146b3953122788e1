//! # Testnet Bundle
//!
//! The only persisted artifact of a genesis run. Created once, never
//! modified; regenerating replaces the whole directory.

use bb_01_binary_codec::{DecodeError, Root};
use shared_types::{BeaconState, PresetConfig, PresetName};

use super::boot_address::BootAddress;

/// Canonical encoding of the genesis state.
pub const GENESIS_STATE_FILE: &str = "genesis.ssz";
/// Uppercase YAML metadata.
pub const CONFIG_FILE: &str = "config.yaml";
/// YAML sequence of boot addresses.
pub const BOOT_ENR_FILE: &str = "boot_enr.yaml";
/// Single-line deposit contract reference.
pub const DEPOSIT_CONTRACT_FILE: &str = "deposit_contract.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestnetBundle {
    pub preset_name: PresetName,
    pub encoded_state: Vec<u8>,
    pub genesis_time: u64,
    pub genesis_state_root: Root,
    pub genesis_validators_root: Root,
    pub validator_count: u64,
    pub boot_addresses: Vec<BootAddress>,
    pub deposit_contract: String,
}

impl TestnetBundle {
    /// Decode the bundled state.
    pub fn state(&self, preset: &PresetConfig) -> Result<BeaconState, DecodeError> {
        BeaconState::decode(&self.encoded_state, preset)
    }
}
