//! # Genesis State Builder
//!
//! Builds the phase-0 genesis state for a validator count, a preset and a
//! genesis time. Validators are active from the genesis epoch onwards;
//! deposit processing is skipped entirely.

use bb_01_binary_codec::BitField;
use bb_02_key_derivation::{KeyDeriver, Seed, ValidatorKey};
use shared_types::{
    empty_block_body_root, empty_deposit_root, validators_root, BeaconBlockHeader, BeaconState,
    Checkpoint, Eth1Data, Fork, Hash, PresetConfig, Validator, FAR_FUTURE_EPOCH, GENESIS_EPOCH,
    GENESIS_SLOT, JUSTIFICATION_BITS_LENGTH,
};
use tracing::{debug, info};

use crate::errors::GenesisError;

/// Eth1 block hash used when none is configured.
pub const DEFAULT_ETH1_BLOCK_HASH: Hash = [0x42; 32];

/// Builder for genesis states.
#[derive(Debug, Clone)]
pub struct GenesisBuilder {
    seed: Seed,
    eth1_block_hash: Hash,
    parallel: bool,
}

impl GenesisBuilder {
    /// Create a builder deriving validator keys from `seed`.
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            eth1_block_hash: DEFAULT_ETH1_BLOCK_HASH,
            parallel: false,
        }
    }

    /// Eth1 block hash recorded in `eth1_data` and every randao mix.
    pub fn with_eth1_block_hash(mut self, eth1_block_hash: Hash) -> Self {
        self.eth1_block_hash = eth1_block_hash;
        self
    }

    /// Derive keys on the rayon pool.
    pub fn with_parallel_derivation(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the genesis state.
    ///
    /// `genesis_time` is copied verbatim. Nothing partial is returned: any
    /// failure leaves no state behind.
    pub fn build(
        &self,
        validator_count: u64,
        preset: &PresetConfig,
        genesis_time: u64,
    ) -> Result<BeaconState, GenesisError> {
        if validator_count == 0 {
            return Err(GenesisError::NoValidators);
        }
        let limit = preset.validator_registry_limit as u64;
        if validator_count > limit {
            return Err(GenesisError::ValidatorCountExceedsPreset {
                requested: validator_count,
                limit,
            });
        }

        let keys = KeyDeriver::new(self.seed.clone(), validator_count).derive_all(self.parallel)?;
        let validators = genesis_validators(&keys, preset);
        let balances = vec![preset.max_effective_balance; validators.len()];

        let genesis_validators_root = validators_root(&validators, preset)?;
        let body_root = empty_block_body_root(preset)?;
        let deposit_root = empty_deposit_root()?;
        debug!(
            validators_root = %hex::encode(genesis_validators_root),
            body_root = %hex::encode(body_root),
            "Computed genesis roots"
        );

        let fork = Fork {
            previous_version: preset.genesis_fork_version,
            current_version: preset.genesis_fork_version,
            epoch: GENESIS_EPOCH,
        };

        let state = BeaconState {
            genesis_time,
            genesis_validators_root,
            slot: GENESIS_SLOT,
            fork,
            latest_block_header: BeaconBlockHeader {
                body_root,
                ..Default::default()
            },
            block_roots: vec![[0; 32]; preset.slots_per_historical_root],
            state_roots: vec![[0; 32]; preset.slots_per_historical_root],
            historical_roots: Vec::new(),
            eth1_data: Eth1Data {
                deposit_root,
                deposit_count: validator_count,
                block_hash: self.eth1_block_hash,
            },
            eth1_data_votes: Vec::new(),
            eth1_deposit_index: validator_count,
            validators,
            balances,
            randao_mixes: vec![self.eth1_block_hash; preset.epochs_per_historical_vector],
            slashings: vec![0; preset.epochs_per_slashings_vector],
            previous_epoch_attestations: Vec::new(),
            current_epoch_attestations: Vec::new(),
            justification_bits: BitField::zeroed(JUSTIFICATION_BITS_LENGTH),
            previous_justified_checkpoint: Checkpoint::default(),
            current_justified_checkpoint: Checkpoint::default(),
            finalized_checkpoint: Checkpoint::default(),
        };

        info!(
            preset = %preset.name,
            validator_count,
            genesis_time,
            "Built genesis state"
        );
        Ok(state)
    }
}

/// One active validator per key, in key order.
pub fn genesis_validators(keys: &[ValidatorKey], preset: &PresetConfig) -> Vec<Validator> {
    keys.iter()
        .map(|key| Validator {
            pubkey: key.pubkey(),
            withdrawal_credentials: key.withdrawal_credentials,
            effective_balance: preset.max_effective_balance,
            slashed: false,
            activation_eligibility_epoch: GENESIS_EPOCH,
            activation_epoch: GENESIS_EPOCH,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_02_key_derivation::KeyDerivationError;

    fn builder() -> GenesisBuilder {
        GenesisBuilder::new(Seed::parse("0xdeadbeef").unwrap())
    }

    #[test]
    fn test_minimal_genesis_shape() {
        let preset = PresetConfig::minimal();
        let state = builder().build(16, &preset, 1_600_000_000).unwrap();

        assert_eq!(state.genesis_time, 1_600_000_000);
        assert_eq!(state.validators.len(), 16);
        assert_eq!(state.balances, vec![32_000_000_000; 16]);
        assert_eq!(state.eth1_deposit_index, 16);
        assert_eq!(state.eth1_data.deposit_count, 16);
        assert_eq!(state.fork.current_version, [0, 0, 0, 1]);
        assert_eq!(state.randao_mixes.len(), 64);
        assert!(state.randao_mixes.iter().all(|mix| *mix == DEFAULT_ETH1_BLOCK_HASH));
        assert!(state
            .validators
            .iter()
            .all(|v| v.activation_epoch == GENESIS_EPOCH && v.exit_epoch == FAR_FUTURE_EPOCH));
    }

    #[test]
    fn test_genesis_roots() {
        let preset = PresetConfig::minimal();
        let state = builder().build(4, &preset, 0).unwrap();
        assert_eq!(
            state.genesis_validators_root,
            validators_root(&state.validators, &preset).unwrap()
        );
        assert_eq!(
            state.latest_block_header.body_root,
            empty_block_body_root(&preset).unwrap()
        );
        assert_eq!(state.eth1_data.deposit_root, empty_deposit_root().unwrap());
    }

    #[test]
    fn test_build_is_deterministic() {
        let preset = PresetConfig::minimal();
        let a = builder().build(8, &preset, 1_600_000_000).unwrap();
        let b = builder()
            .with_parallel_derivation(true)
            .build(8, &preset, 1_600_000_000)
            .unwrap();
        assert_eq!(a.encode(&preset).unwrap(), b.encode(&preset).unwrap());
    }

    #[test]
    fn test_zero_validators_rejected() {
        let result = builder().build(0, &PresetConfig::minimal(), 0);
        assert_eq!(result, Err(GenesisError::NoValidators));
    }

    #[test]
    fn test_registry_limit_is_inclusive() {
        let preset = PresetConfig::minimal().with_validator_registry_limit(16);
        assert!(builder().build(16, &preset, 0).is_ok());
        assert_eq!(
            builder().build(17, &preset, 0),
            Err(GenesisError::ValidatorCountExceedsPreset {
                requested: 17,
                limit: 16
            })
        );
    }

    #[test]
    fn test_custom_eth1_block_hash() {
        let preset = PresetConfig::minimal();
        let state = builder()
            .with_eth1_block_hash([7; 32])
            .build(1, &preset, 0)
            .unwrap();
        assert_eq!(state.eth1_data.block_hash, [7; 32]);
        assert_eq!(state.randao_mixes[0], [7; 32]);
    }

    #[test]
    fn test_key_errors_propagate() {
        let err: GenesisError = KeyDerivationError::InvalidSeed("empty".into()).into();
        assert!(matches!(err, GenesisError::KeyDerivation(_)));
    }
}
