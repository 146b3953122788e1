//! # Presets
//!
//! A preset is a named bundle of size constants. It fixes every vector
//! length and list limit in the state schema, so two states are only
//! comparable when built under the same preset.
//!
//! Network configs sit on top of a preset base: `altona` keeps the mainnet
//! sizes apart from a shorter eth1 voting period, and has its own fork
//! version and genesis thresholds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PresetError;

/// Names of the supported network configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Small vectors for local testnets.
    #[default]
    Minimal,
    /// Production sizes.
    Mainnet,
    /// Multi-client testnet on mainnet sizes.
    Altona,
}

impl PresetName {
    /// Lowercase name, as written to `CONFIG_NAME`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Minimal => "minimal",
            PresetName::Mainnet => "mainnet",
            PresetName::Altona => "altona",
        }
    }

    /// The preset whose sizes this config uses, as written to `PRESET_BASE`.
    pub fn base(&self) -> PresetName {
        match self {
            PresetName::Minimal => PresetName::Minimal,
            PresetName::Mainnet | PresetName::Altona => PresetName::Mainnet,
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(PresetName::Minimal),
            "mainnet" => Ok(PresetName::Mainnet),
            "altona" => Ok(PresetName::Altona),
            _ => Err(PresetError::Unknown(s.to_string())),
        }
    }
}

/// Constant bundle parameterizing the state schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetConfig {
    pub name: PresetName,
    pub slots_per_epoch: u64,
    pub slots_per_historical_root: usize,
    pub epochs_per_historical_vector: usize,
    pub epochs_per_slashings_vector: usize,
    pub historical_roots_limit: usize,
    pub validator_registry_limit: usize,
    pub epochs_per_eth1_voting_period: usize,
    pub max_attestations: usize,
    pub max_validators_per_committee: usize,
    /// Gwei.
    pub max_effective_balance: u64,
    #[serde(with = "hex::serde")]
    pub genesis_fork_version: [u8; 4],
    pub seconds_per_slot: u64,
    pub min_genesis_time: u64,
    pub min_genesis_active_validator_count: u64,
    /// Delay a deposit-driven genesis would add; recorded in bundle metadata.
    pub genesis_delay: u64,
}

impl PresetConfig {
    pub fn mainnet() -> Self {
        Self {
            name: PresetName::Mainnet,
            slots_per_epoch: 32,
            slots_per_historical_root: 8192,
            epochs_per_historical_vector: 65536,
            epochs_per_slashings_vector: 8192,
            historical_roots_limit: 1 << 24,
            validator_registry_limit: 1 << 40,
            epochs_per_eth1_voting_period: 64,
            max_attestations: 128,
            max_validators_per_committee: 2048,
            max_effective_balance: 32_000_000_000,
            genesis_fork_version: [0x00, 0x00, 0x00, 0x00],
            seconds_per_slot: 12,
            min_genesis_time: 1_606_824_000,
            min_genesis_active_validator_count: 16384,
            genesis_delay: 604_800,
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: PresetName::Minimal,
            slots_per_epoch: 8,
            slots_per_historical_root: 64,
            epochs_per_historical_vector: 64,
            epochs_per_slashings_vector: 64,
            historical_roots_limit: 1 << 24,
            validator_registry_limit: 1 << 40,
            epochs_per_eth1_voting_period: 4,
            max_attestations: 128,
            max_validators_per_committee: 2048,
            max_effective_balance: 32_000_000_000,
            genesis_fork_version: [0x00, 0x00, 0x00, 0x01],
            seconds_per_slot: 6,
            min_genesis_time: 1_578_009_600,
            min_genesis_active_validator_count: 64,
            genesis_delay: 300,
        }
    }

    /// Mainnet sizes with the Altona fork version, genesis thresholds and a
    /// shorter eth1 voting period.
    pub fn altona() -> Self {
        Self {
            name: PresetName::Altona,
            epochs_per_eth1_voting_period: 32,
            genesis_fork_version: [0x00, 0x00, 0x01, 0x21],
            min_genesis_time: 1_593_433_800,
            min_genesis_active_validator_count: 640,
            genesis_delay: 172_800,
            ..Self::mainnet()
        }
    }

    pub fn for_name(name: PresetName) -> Self {
        match name {
            PresetName::Minimal => Self::minimal(),
            PresetName::Mainnet => Self::mainnet(),
            PresetName::Altona => Self::altona(),
        }
    }

    /// Shrink (or grow) the validator registry bound, e.g. for small test
    /// fleets. Affects the `validators` and `balances` list limits.
    pub fn with_validator_registry_limit(mut self, limit: usize) -> Self {
        self.validator_registry_limit = limit;
        self
    }

    /// Maximum length of `eth1_data_votes`.
    pub fn eth1_data_votes_limit(&self) -> usize {
        self.epochs_per_eth1_voting_period * self.slots_per_epoch as usize
    }

    /// Maximum length of each epoch's pending attestation list.
    pub fn pending_attestations_limit(&self) -> usize {
        self.max_attestations * self.slots_per_epoch as usize
    }
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self::minimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_name_parsing() {
        assert_eq!("minimal".parse::<PresetName>().unwrap(), PresetName::Minimal);
        assert_eq!("Mainnet".parse::<PresetName>().unwrap(), PresetName::Mainnet);
        assert_eq!(" ALTONA ".parse::<PresetName>().unwrap(), PresetName::Altona);
        assert_eq!(
            "medalla".parse::<PresetName>(),
            Err(PresetError::Unknown("medalla".into()))
        );
    }

    #[test]
    fn test_preset_name_display_roundtrip() {
        for name in [PresetName::Minimal, PresetName::Mainnet, PresetName::Altona] {
            assert_eq!(name.to_string().parse::<PresetName>().unwrap(), name);
        }
    }

    #[test]
    fn test_minimal_sizes() {
        let preset = PresetConfig::minimal();
        assert_eq!(preset.slots_per_historical_root, 64);
        assert_eq!(preset.eth1_data_votes_limit(), 32);
        assert_eq!(preset.pending_attestations_limit(), 1024);
        assert_eq!(preset.genesis_fork_version, [0, 0, 0, 1]);
    }

    #[test]
    fn test_mainnet_sizes() {
        let preset = PresetConfig::mainnet();
        assert_eq!(preset.epochs_per_historical_vector, 65536);
        assert_eq!(preset.eth1_data_votes_limit(), 2048);
        assert_eq!(preset.pending_attestations_limit(), 4096);
    }

    #[test]
    fn test_altona_uses_mainnet_sizes() {
        let altona = PresetConfig::altona();
        let mainnet = PresetConfig::mainnet();
        assert_eq!(altona.name.base(), PresetName::Mainnet);
        assert_eq!(altona.genesis_fork_version, [0x00, 0x00, 0x01, 0x21]);
        assert_eq!(altona.min_genesis_active_validator_count, 640);
        assert_eq!(altona.genesis_delay, 172_800);
        assert_eq!(altona.eth1_data_votes_limit(), 1024);
        assert_eq!(
            PresetConfig {
                name: PresetName::Mainnet,
                epochs_per_eth1_voting_period: mainnet.epochs_per_eth1_voting_period,
                genesis_fork_version: mainnet.genesis_fork_version,
                min_genesis_time: mainnet.min_genesis_time,
                min_genesis_active_validator_count: mainnet.min_genesis_active_validator_count,
                genesis_delay: mainnet.genesis_delay,
                ..altona
            },
            mainnet
        );
        assert_eq!(PresetConfig::for_name(PresetName::Altona), PresetConfig::altona());
    }

    #[test]
    fn test_registry_limit_override() {
        let preset = PresetConfig::minimal().with_validator_registry_limit(16);
        assert_eq!(preset.validator_registry_limit, 16);
        assert_eq!(preset.name, PresetName::Minimal);
    }

    #[test]
    fn test_fork_version_serializes_as_hex() {
        let json = serde_json::to_value(PresetConfig::minimal()).unwrap();
        assert_eq!(json["genesis_fork_version"], "00000001");
        assert_eq!(json["name"], "minimal");
    }
}
