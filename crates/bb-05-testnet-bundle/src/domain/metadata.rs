//! # Bundle Metadata (`config.yaml`)
//!
//! Uppercase keys, the way consensus clients lay out their network
//! configs. `PRESET_BASE` names the size preset and `CONFIG_NAME` the
//! network config on top of it; the preset parameters are repeated so a
//! node can size its schemas without guessing.

use bb_01_binary_codec::Root;
use serde::{Deserialize, Serialize};
use shared_types::{PresetConfig, PresetName};

use crate::errors::BundleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BundleConfig {
    pub preset_base: String,
    pub config_name: String,

    pub genesis_time: u64,
    pub genesis_state_root: String,
    pub genesis_validators_root: String,
    pub validator_count: u64,
    pub deposit_contract_address: String,

    #[serde(with = "hex::serde")]
    pub genesis_fork_version: [u8; 4],
    pub seconds_per_slot: u64,
    pub slots_per_epoch: u64,
    pub slots_per_historical_root: usize,
    pub epochs_per_historical_vector: usize,
    pub epochs_per_slashings_vector: usize,
    pub historical_roots_limit: usize,
    pub validator_registry_limit: usize,
    pub epochs_per_eth1_voting_period: usize,
    pub max_attestations: usize,
    pub max_validators_per_committee: usize,
    pub max_effective_balance: u64,
    pub min_genesis_time: u64,
    pub min_genesis_active_validator_count: u64,
    pub genesis_delay: u64,
}

/// Only `PRESET_BASE` and `CONFIG_NAME`; tolerates any other content.
#[derive(Debug, Deserialize)]
pub(crate) struct PresetProbe {
    #[serde(rename = "PRESET_BASE")]
    pub preset_base: String,
    #[serde(rename = "CONFIG_NAME", default)]
    pub config_name: Option<String>,
}

impl PresetProbe {
    /// The network config the bundle was built for.
    pub fn network_name(&self) -> &str {
        self.config_name.as_deref().unwrap_or(&self.preset_base)
    }
}

impl BundleConfig {
    pub fn new(
        preset: &PresetConfig,
        genesis_time: u64,
        genesis_state_root: &Root,
        genesis_validators_root: &Root,
        validator_count: u64,
        deposit_contract: &str,
    ) -> Self {
        Self {
            preset_base: preset.name.base().to_string(),
            config_name: preset.name.to_string(),
            genesis_time,
            genesis_state_root: format_root(genesis_state_root),
            genesis_validators_root: format_root(genesis_validators_root),
            validator_count,
            deposit_contract_address: deposit_contract.to_string(),
            genesis_fork_version: preset.genesis_fork_version,
            seconds_per_slot: preset.seconds_per_slot,
            slots_per_epoch: preset.slots_per_epoch,
            slots_per_historical_root: preset.slots_per_historical_root,
            epochs_per_historical_vector: preset.epochs_per_historical_vector,
            epochs_per_slashings_vector: preset.epochs_per_slashings_vector,
            historical_roots_limit: preset.historical_roots_limit,
            validator_registry_limit: preset.validator_registry_limit,
            epochs_per_eth1_voting_period: preset.epochs_per_eth1_voting_period,
            max_attestations: preset.max_attestations,
            max_validators_per_committee: preset.max_validators_per_committee,
            max_effective_balance: preset.max_effective_balance,
            min_genesis_time: preset.min_genesis_time,
            min_genesis_active_validator_count: preset.min_genesis_active_validator_count,
            genesis_delay: preset.genesis_delay,
        }
    }

    /// The preset this bundle was built under, including a reduced
    /// registry limit if one was used.
    pub fn preset(&self) -> Result<PresetConfig, BundleError> {
        let name: PresetName = self
            .config_name
            .parse()
            .map_err(|e| BundleError::Inconsistent(format!("CONFIG_NAME: {e}")))?;
        if name.base().as_str() != self.preset_base {
            return Err(BundleError::Inconsistent(format!(
                "CONFIG_NAME {} is based on {} but PRESET_BASE is {}",
                name,
                name.base(),
                self.preset_base
            )));
        }
        Ok(PresetConfig::for_name(name).with_validator_registry_limit(self.validator_registry_limit))
    }

    /// Fail unless this bundle was recorded under exactly `preset`.
    ///
    /// The names are compared first (`PresetMismatch`), then every recorded
    /// preset parameter (`PresetParameterMismatch`, naming the first key that
    /// differs).
    pub fn check_preset(&self, preset: &PresetConfig) -> Result<(), BundleError> {
        if self.preset_base != preset.name.base().as_str() || self.config_name != preset.name.as_str() {
            return Err(BundleError::PresetMismatch {
                existing: self.config_name.clone(),
                requested: preset.name,
            });
        }

        let expected = Self::new(preset, 0, &[0; 32], &[0; 32], 0, "");
        let differing = self
            .preset_parameters()
            .into_iter()
            .zip(expected.preset_parameters())
            .find(|((_, recorded), (_, wanted))| recorded != wanted);
        match differing {
            Some(((key, recorded), (_, expected))) => Err(BundleError::PresetParameterMismatch {
                key,
                recorded,
                expected,
            }),
            None => Ok(()),
        }
    }

    fn preset_parameters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("GENESIS_FORK_VERSION", format!("0x{}", hex::encode(self.genesis_fork_version))),
            ("SECONDS_PER_SLOT", self.seconds_per_slot.to_string()),
            ("SLOTS_PER_EPOCH", self.slots_per_epoch.to_string()),
            ("SLOTS_PER_HISTORICAL_ROOT", self.slots_per_historical_root.to_string()),
            ("EPOCHS_PER_HISTORICAL_VECTOR", self.epochs_per_historical_vector.to_string()),
            ("EPOCHS_PER_SLASHINGS_VECTOR", self.epochs_per_slashings_vector.to_string()),
            ("HISTORICAL_ROOTS_LIMIT", self.historical_roots_limit.to_string()),
            ("VALIDATOR_REGISTRY_LIMIT", self.validator_registry_limit.to_string()),
            ("EPOCHS_PER_ETH1_VOTING_PERIOD", self.epochs_per_eth1_voting_period.to_string()),
            ("MAX_ATTESTATIONS", self.max_attestations.to_string()),
            ("MAX_VALIDATORS_PER_COMMITTEE", self.max_validators_per_committee.to_string()),
            ("MAX_EFFECTIVE_BALANCE", self.max_effective_balance.to_string()),
            ("MIN_GENESIS_TIME", self.min_genesis_time.to_string()),
            (
                "MIN_GENESIS_ACTIVE_VALIDATOR_COUNT",
                self.min_genesis_active_validator_count.to_string(),
            ),
            ("GENESIS_DELAY", self.genesis_delay.to_string()),
        ]
    }

    pub fn to_yaml(&self) -> Result<String, BundleError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self, BundleError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// `0x`-prefixed lowercase hex.
pub fn format_root(root: &Root) -> String {
    format!("0x{}", hex::encode(root))
}

/// Inverse of [`format_root`].
pub fn parse_root(text: &str) -> Result<Root, BundleError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let mut root = [0u8; 32];
    hex::decode_to_slice(digits, &mut root)
        .map_err(|e| BundleError::Inconsistent(format!("bad root '{text}': {e}")))?;
    Ok(root)
}
