//! # Bootstrap Configuration
//!
//! Every option a genesis run recognizes, with its default. Loaded from a
//! YAML file, then overridden by command-line flags, then validated once
//! before anything is derived or written.
//!
//! ```yaml
//! genesis:
//!   preset: minimal
//!   validator_count: 16
//!   seed: "0xdeadbeef"
//!   genesis_time: 1600000000
//! network:
//!   boot_addresses: ["/ip4/127.0.0.1/tcp/9000"]
//!   deposit_contract: "0x16e82D77882A663454Ef92806b7DeCa1D394810f"
//! output:
//!   out_dir: ./testnet
//! ```

use std::path::{Path, PathBuf};

use bb_05_testnet_bundle::BootAddress;
use serde::Deserialize;
use shared_types::{Hash, PresetConfig, PresetName};
use thiserror::Error;

/// Deposit contract recorded when none is configured.
pub const DEFAULT_DEPOSIT_CONTRACT: &str = "0x16e82D77882A663454Ef92806b7DeCa1D394810f";

/// Configuration errors. All map to the usage exit status.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete bootstrap configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    pub genesis: GenesisSection,
    pub network: NetworkSection,
    pub output: OutputSection,
}

/// What goes into the genesis state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenesisSection {
    pub preset: PresetName,
    pub validator_count: u64,
    /// `0x`-prefixed hex, or any other text used as raw bytes.
    pub seed: String,
    /// Fixed genesis time. When absent the clock decides.
    pub genesis_time: Option<u64>,
    /// Seconds added to a clock-derived genesis time.
    pub genesis_delay: u64,
    /// 32-byte hex. Defaults to the builder's placeholder hash.
    pub eth1_block_hash: Option<String>,
    /// Shrinks the validator registry bound below the preset's.
    pub validator_registry_limit: Option<usize>,
    /// Derive keys on all cores.
    pub parallel: bool,
}

impl Default for GenesisSection {
    fn default() -> Self {
        Self {
            preset: PresetName::Minimal,
            validator_count: 16,
            seed: String::new(),
            genesis_time: None,
            genesis_delay: 0,
            eth1_block_hash: None,
            validator_registry_limit: None,
            parallel: false,
        }
    }
}

/// What nodes need to find each other.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSection {
    pub boot_addresses: Vec<String>,
    pub deposit_contract: String,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            boot_addresses: Vec::new(),
            deposit_contract: DEFAULT_DEPOSIT_CONTRACT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub out_dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("./testnet"),
        }
    }
}

impl BootstrapConfig {
    /// Load from a YAML file. Missing keys take their defaults; unknown
    /// keys are rejected.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&text).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })
    }

    /// Check everything that can be checked without deriving a key.
    ///
    /// The seed is left to the key deriver so an empty seed surfaces as an
    /// invalid seed rather than a configuration error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.genesis.validator_count == 0 {
            return Err(ConfigError::Invalid(
                "genesis.validator_count must be at least 1".into(),
            ));
        }
        if self.genesis.validator_registry_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "genesis.validator_registry_limit must be at least 1".into(),
            ));
        }
        self.eth1_block_hash()?;
        self.boot_addresses()?;

        let contract = self.network.deposit_contract.trim();
        if contract.is_empty() || contract.contains(['\n', '\r']) {
            return Err(ConfigError::Invalid(
                "network.deposit_contract must be a single non-empty line".into(),
            ));
        }
        if self.output.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output.out_dir must not be empty".into()));
        }
        Ok(())
    }

    /// The preset with any registry limit override applied.
    pub fn preset(&self) -> PresetConfig {
        let preset = PresetConfig::for_name(self.genesis.preset);
        match self.genesis.validator_registry_limit {
            Some(limit) => preset.with_validator_registry_limit(limit),
            None => preset,
        }
    }

    pub fn eth1_block_hash(&self) -> Result<Option<Hash>, ConfigError> {
        let Some(text) = &self.genesis.eth1_block_hash else {
            return Ok(None);
        };
        let mut hash = [0u8; 32];
        hex::decode_to_slice(text.strip_prefix("0x").unwrap_or(text), &mut hash).map_err(
            |e| ConfigError::Invalid(format!("genesis.eth1_block_hash '{text}': {e}")),
        )?;
        Ok(Some(hash))
    }

    pub fn boot_addresses(&self) -> Result<Vec<BootAddress>, ConfigError> {
        self.network
            .boot_addresses
            .iter()
            .map(|text| {
                BootAddress::parse(text)
                    .map_err(|e| ConfigError::Invalid(format!("network.boot_addresses: {e}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = BootstrapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.preset(), PresetConfig::minimal());
        assert_eq!(config.network.deposit_contract, DEFAULT_DEPOSIT_CONTRACT);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = BootstrapConfig::from_yaml(
            "genesis:\n  preset: mainnet\n  seed: \"0x01\"\n  genesis_time: 1600000000\n",
        )
        .unwrap();
        assert_eq!(config.genesis.preset, PresetName::Mainnet);
        assert_eq!(config.genesis.genesis_time, Some(1_600_000_000));
        assert_eq!(config.genesis.validator_count, 16);
        assert_eq!(config.output.out_dir, PathBuf::from("./testnet"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(matches!(
            BootstrapConfig::from_yaml("genesis:\n  validators: 4\n"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            BootstrapConfig::from_yaml("logging: {}\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_validators_invalid() {
        let mut config = BootstrapConfig::default();
        config.genesis.validator_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_boot_address_invalid() {
        let mut config = BootstrapConfig::default();
        config.network.boot_addresses = vec!["not an address".into()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_eth1_block_hash_parsing() {
        let mut config = BootstrapConfig::default();
        config.genesis.eth1_block_hash = Some(format!("0x{}", "11".repeat(32)));
        assert_eq!(config.eth1_block_hash().unwrap(), Some([0x11; 32]));

        config.genesis.eth1_block_hash = Some("0x11".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_registry_limit_override() {
        let mut config = BootstrapConfig::default();
        config.genesis.validator_registry_limit = Some(16);
        assert_eq!(config.preset().validator_registry_limit, 16);

        config.genesis.validator_registry_limit = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = BootstrapConfig::from_file(Path::new("/nonexistent/bootstrap.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
