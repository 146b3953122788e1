//! # Bundle Flow
//!
//! state → bundle directory → node-side load
//!
//! Covers the minimal-preset scenario, refusal to overwrite a bundle built
//! for another preset, and tamper detection on load.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;

    use bb_05_testnet_bundle::{
        format_root, materialize, BootAddress, BundleError, TestnetBundle, BOOT_ENR_FILE,
        CONFIG_FILE, DEPOSIT_CONTRACT_FILE, GENESIS_STATE_FILE,
    };
    use shared_types::{BeaconState, PresetConfig};

    use crate::fixtures::{build_genesis, SCENARIO_DEPOSIT_CONTRACT, SCENARIO_GENESIS_TIME};

    fn boot_addresses() -> Vec<BootAddress> {
        [
            "enr:-IS4QHCYrYZbAKWCBRlAy5zzaDZXJBGkcnh4MHcBFZntXNFrdvJjX04jRzjzCBOonrkTfj499SZuOh8R33Ls8RRcy5wBgmlkgnY0",
            "/ip4/10.0.0.2/tcp/9000",
            "10.0.0.3:9000",
        ]
        .iter()
        .map(|text| BootAddress::parse(text).unwrap())
        .collect()
    }

    fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                (
                    entry.file_name().into_string().unwrap(),
                    fs::read(entry.path()).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_minimal_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();

        let state = build_genesis(16, &preset, SCENARIO_GENESIS_TIME).unwrap();
        assert_eq!(state.validators.len(), 16);
        assert_eq!(state.balances.len(), 16);
        assert!(state
            .balances
            .iter()
            .all(|balance| *balance == preset.max_effective_balance));

        materialize(
            &state,
            &preset,
            &boot_addresses(),
            SCENARIO_DEPOSIT_CONTRACT,
            &out_dir,
        )
        .unwrap();

        let files: Vec<_> = snapshot(&out_dir).into_keys().collect();
        assert_eq!(
            files,
            vec![BOOT_ENR_FILE, CONFIG_FILE, DEPOSIT_CONTRACT_FILE, GENESIS_STATE_FILE]
        );

        let decoded =
            BeaconState::decode(&fs::read(out_dir.join(GENESIS_STATE_FILE)).unwrap(), &preset)
                .unwrap();
        assert_eq!(decoded.genesis_time, SCENARIO_GENESIS_TIME);
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_node_side_load_sees_same_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();
        let state = build_genesis(16, &preset, SCENARIO_GENESIS_TIME).unwrap();

        let written = materialize(
            &state,
            &preset,
            &boot_addresses(),
            SCENARIO_DEPOSIT_CONTRACT,
            &out_dir,
        )
        .unwrap();

        // any number of nodes read the same bundle
        for _ in 0..3 {
            let loaded = TestnetBundle::load(&out_dir, &preset).unwrap();
            assert_eq!(loaded, written);
            assert_eq!(loaded.boot_addresses, boot_addresses());
        }
    }

    #[test]
    fn test_preset_mismatch_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");

        let mainnet = PresetConfig::mainnet();
        let mainnet_state = build_genesis(4, &mainnet, SCENARIO_GENESIS_TIME).unwrap();
        materialize(&mainnet_state, &mainnet, &[], SCENARIO_DEPOSIT_CONTRACT, &out_dir).unwrap();
        let before = snapshot(&out_dir);

        let minimal = PresetConfig::minimal();
        let minimal_state = build_genesis(4, &minimal, SCENARIO_GENESIS_TIME).unwrap();
        let result = materialize(
            &minimal_state,
            &minimal,
            &boot_addresses(),
            SCENARIO_DEPOSIT_CONTRACT,
            &out_dir,
        );

        assert!(matches!(result, Err(BundleError::PresetMismatch { .. })));
        assert_eq!(snapshot(&out_dir), before);
    }

    #[test]
    fn test_no_staging_directory_left_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();

        for time in [SCENARIO_GENESIS_TIME, SCENARIO_GENESIS_TIME + 6] {
            let state = build_genesis(4, &preset, time).unwrap();
            materialize(&state, &preset, &[], SCENARIO_DEPOSIT_CONTRACT, &out_dir).unwrap();
        }

        let mut siblings: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        siblings.sort();
        assert_eq!(siblings, vec!["testnet".to_string(), "testnet.lock".to_string()]);
    }

    #[test]
    fn test_tampered_state_root_detected() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();
        let state = build_genesis(4, &preset, SCENARIO_GENESIS_TIME).unwrap();
        let bundle = materialize(&state, &preset, &[], SCENARIO_DEPOSIT_CONTRACT, &out_dir).unwrap();

        let config_path = out_dir.join(CONFIG_FILE);
        let tampered = fs::read_to_string(&config_path)
            .unwrap()
            .replace(&format_root(&bundle.genesis_state_root), &format_root(&[0x11; 32]));
        fs::write(&config_path, tampered).unwrap();

        assert!(matches!(
            TestnetBundle::load(&out_dir, &preset),
            Err(BundleError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_swapped_state_detected() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        let preset = PresetConfig::minimal();

        let state_a = build_genesis(4, &preset, SCENARIO_GENESIS_TIME).unwrap();
        let state_b = build_genesis(4, &preset, SCENARIO_GENESIS_TIME + 6).unwrap();
        materialize(&state_a, &preset, &[], SCENARIO_DEPOSIT_CONTRACT, &a).unwrap();
        materialize(&state_b, &preset, &[], SCENARIO_DEPOSIT_CONTRACT, &b).unwrap();

        fs::copy(b.join(GENESIS_STATE_FILE), a.join(GENESIS_STATE_FILE)).unwrap();

        assert!(matches!(
            TestnetBundle::load(&a, &preset),
            Err(BundleError::Inconsistent(_))
        ));
    }
}
