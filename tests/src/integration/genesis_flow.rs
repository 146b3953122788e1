//! # Genesis Flow
//!
//! seed → keys → validators → state → bytes → state
//!
//! ## Properties
//!
//! 1. **Round trip**: decoding an encoded genesis state yields the same state
//! 2. **Determinism**: identical inputs give byte-identical encodings
//! 3. **Key uniqueness**: no two validators share a public key
//! 4. **Bounds**: the registry limit is inclusive
//! 5. **Truncation**: a truncated encoding never decodes

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bb_01_binary_codec::DecodeError;
    use bb_02_key_derivation::{KeyDeriver, Seed};
    use bb_03_genesis_state::GenesisError;
    use bb_04_genesis_time::retime_encoded;
    use proptest::prelude::*;
    use shared_types::{BeaconState, PresetConfig, BLS_WITHDRAWAL_PREFIX};

    use crate::fixtures::{build_genesis, scenario_builder, SCENARIO_GENESIS_TIME};

    // =========================================================================
    // ROUND TRIP
    // =========================================================================

    #[test]
    fn test_minimal_roundtrip_preserves_order() {
        let preset = PresetConfig::minimal();
        let state = build_genesis(16, &preset, SCENARIO_GENESIS_TIME).unwrap();

        let decoded = BeaconState::decode(&state.encode(&preset).unwrap(), &preset).unwrap();

        assert_eq!(decoded, state);
        let pubkeys: Vec<_> = decoded.validators.iter().map(|v| v.pubkey).collect();
        let expected: Vec<_> = state.validators.iter().map(|v| v.pubkey).collect();
        assert_eq!(pubkeys, expected);
    }

    #[test]
    fn test_mainnet_roundtrip() {
        let preset = PresetConfig::mainnet();
        let state = build_genesis(2, &preset, SCENARIO_GENESIS_TIME).unwrap();
        let decoded = BeaconState::decode(&state.encode(&preset).unwrap(), &preset).unwrap();
        assert_eq!(decoded, state);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_genesis_roundtrip(count in 1u64..8, genesis_time in any::<u64>()) {
            let preset = PresetConfig::minimal();
            let state = build_genesis(count, &preset, genesis_time).unwrap();
            let bytes = state.encode(&preset).unwrap();
            prop_assert_eq!(BeaconState::decode(&bytes, &preset).unwrap(), state);
        }
    }

    // =========================================================================
    // DETERMINISM
    // =========================================================================

    #[test]
    fn test_independent_runs_are_byte_identical() {
        let preset = PresetConfig::minimal();
        let a = build_genesis(16, &preset, SCENARIO_GENESIS_TIME).unwrap();
        let b = scenario_builder()
            .with_parallel_derivation(true)
            .build(16, &preset, SCENARIO_GENESIS_TIME)
            .unwrap();

        assert_eq!(a.encode(&preset).unwrap(), b.encode(&preset).unwrap());
        assert_eq!(a.hash_tree_root(&preset).unwrap(), b.hash_tree_root(&preset).unwrap());
    }

    #[test]
    fn test_different_seed_different_state() {
        let preset = PresetConfig::minimal();
        let a = build_genesis(4, &preset, 0).unwrap();
        let b = bb_03_genesis_state::GenesisBuilder::new(Seed::parse("another seed").unwrap())
            .build(4, &preset, 0)
            .unwrap();
        assert_ne!(a.genesis_validators_root, b.genesis_validators_root);
    }

    // =========================================================================
    // KEYS
    // =========================================================================

    #[test]
    fn test_public_keys_pairwise_distinct() {
        let preset = PresetConfig::minimal();
        let state = build_genesis(64, &preset, 0).unwrap();
        let unique: HashSet<_> = state.validators.iter().map(|v| v.pubkey).collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_validators_follow_key_order() {
        let preset = PresetConfig::minimal();
        let state = build_genesis(5, &preset, 0).unwrap();
        let deriver = KeyDeriver::new(Seed::parse(crate::fixtures::SCENARIO_SEED).unwrap(), 5);

        for (index, validator) in state.validators.iter().enumerate() {
            let key = deriver.derive(index as u64).unwrap();
            assert_eq!(validator.pubkey, key.pubkey());
            assert_eq!(validator.withdrawal_credentials, key.withdrawal_credentials);
            assert_eq!(validator.withdrawal_credentials[0], BLS_WITHDRAWAL_PREFIX);
        }
    }

    // =========================================================================
    // BOUNDS
    // =========================================================================

    #[test]
    fn test_registry_limit_inclusive() {
        let preset = PresetConfig::minimal().with_validator_registry_limit(16);

        let at_limit = build_genesis(16, &preset, 0).unwrap();
        assert_eq!(at_limit.validators.len(), 16);

        assert_eq!(
            build_genesis(17, &preset, 0),
            Err(GenesisError::ValidatorCountExceedsPreset {
                requested: 17,
                limit: 16
            })
        );
    }

    #[test]
    fn test_state_at_reduced_limit_roundtrips() {
        let preset = PresetConfig::minimal().with_validator_registry_limit(16);
        let state = build_genesis(16, &preset, 0).unwrap();
        let bytes = state.encode(&preset).unwrap();
        assert_eq!(BeaconState::decode(&bytes, &preset).unwrap(), state);
    }

    // =========================================================================
    // DECODE ROBUSTNESS
    // =========================================================================

    #[test]
    fn test_truncated_encoding_fails() {
        let preset = PresetConfig::minimal();
        let bytes = build_genesis(16, &preset, SCENARIO_GENESIS_TIME)
            .unwrap()
            .encode(&preset)
            .unwrap();

        let result = BeaconState::decode(&bytes[..bytes.len() - 1], &preset);
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_byte_fails() {
        let preset = PresetConfig::minimal();
        let mut bytes = build_genesis(1, &preset, 0).unwrap().encode(&preset).unwrap();
        bytes.push(0);
        assert!(BeaconState::decode(&bytes, &preset).is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            BeaconState::decode(&[], &PresetConfig::minimal()),
            Err(DecodeError::TooShort { .. })
        ));
    }

    // =========================================================================
    // RE-TIMING
    // =========================================================================

    #[test]
    fn test_retime_changes_only_time_and_root() {
        let preset = PresetConfig::minimal();
        let state = build_genesis(8, &preset, SCENARIO_GENESIS_TIME).unwrap();
        let bytes = state.encode(&preset).unwrap();

        let retimed_bytes = retime_encoded(&bytes, &preset, SCENARIO_GENESIS_TIME + 60).unwrap();
        let retimed = BeaconState::decode(&retimed_bytes, &preset).unwrap();

        assert_eq!(retimed.genesis_time, SCENARIO_GENESIS_TIME + 60);
        assert_eq!(
            BeaconState {
                genesis_time: SCENARIO_GENESIS_TIME,
                ..retimed.clone()
            },
            state
        );
        assert_ne!(
            retimed.hash_tree_root(&preset).unwrap(),
            state.hash_tree_root(&preset).unwrap()
        );
    }
}
