//! # Bundle Materializer
//!
//! Writes a bundle so that readers only ever see the old directory or the
//! complete new one:
//!
//! 1. lock `<out_dir>.lock`
//! 2. refuse to replace anything but an empty directory or a bundle built
//!    for the same network config
//! 3. write every file into `<out_dir>.staging-<pid>`, fsyncing each
//! 4. move the old directory aside, move staging into place, drop the old one

use std::fs;
use std::path::{Path, PathBuf};

use shared_types::{BeaconState, PresetConfig};
use tracing::{debug, error, info, warn};

use crate::adapters::fs::{read_text, remove_dir_if_exists, write_synced};
use crate::adapters::lock::{sibling_path, BundleLock};
use crate::domain::metadata::PresetProbe;
use crate::domain::{
    format_root, BootAddress, BundleConfig, TestnetBundle, BOOT_ENR_FILE, CONFIG_FILE,
    DEPOSIT_CONTRACT_FILE, GENESIS_STATE_FILE,
};
use crate::errors::BundleError;

/// Removes the staging directory unless the bundle was published.
struct StagingGuard {
    path: PathBuf,
    published: bool,
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if !self.published {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

/// Materialize `state` as a bundle in `out_dir`.
pub fn materialize(
    state: &BeaconState,
    preset: &PresetConfig,
    boot_addresses: &[BootAddress],
    deposit_contract: &str,
    out_dir: &Path,
) -> Result<TestnetBundle, BundleError> {
    let deposit_contract = deposit_contract.trim();
    if deposit_contract.is_empty() || deposit_contract.contains(['\n', '\r']) {
        return Err(BundleError::InvalidInput(
            "deposit contract must be a single non-empty line".into(),
        ));
    }

    if let Some(parent) = out_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BundleError::not_writable(parent, e))?;
    }
    let _lock = BundleLock::acquire(out_dir)?;

    check_existing_bundle(out_dir, preset)?;

    let encoded_state = state.encode(preset)?;
    let genesis_state_root = state.hash_tree_root(preset)?;
    let validator_count = state.validators.len() as u64;
    let config = BundleConfig::new(
        preset,
        state.genesis_time,
        &genesis_state_root,
        &state.genesis_validators_root,
        validator_count,
        deposit_contract,
    );
    let boot_yaml = serde_yaml::to_string(boot_addresses)?;

    let staging = sibling_path(out_dir, &format!("staging-{}", std::process::id()))?;
    remove_dir_if_exists(&staging)?;
    fs::create_dir(&staging).map_err(|e| BundleError::not_writable(&staging, e))?;
    let mut guard = StagingGuard {
        path: staging.clone(),
        published: false,
    };

    write_synced(&staging.join(GENESIS_STATE_FILE), &encoded_state)?;
    write_synced(&staging.join(CONFIG_FILE), config.to_yaml()?.as_bytes())?;
    write_synced(&staging.join(BOOT_ENR_FILE), boot_yaml.as_bytes())?;
    write_synced(
        &staging.join(DEPOSIT_CONTRACT_FILE),
        format!("{deposit_contract}\n").as_bytes(),
    )?;
    debug!(staging = %staging.display(), "Staged bundle files");

    publish(&staging, out_dir)?;
    guard.published = true;

    info!(
        out_dir = %out_dir.display(),
        preset = %preset.name,
        validator_count,
        genesis_time = state.genesis_time,
        state_root = %format_root(&genesis_state_root),
        "Materialized testnet bundle"
    );

    Ok(TestnetBundle {
        preset_name: preset.name,
        encoded_state,
        genesis_time: state.genesis_time,
        genesis_state_root,
        genesis_validators_root: state.genesis_validators_root,
        validator_count,
        boot_addresses: boot_addresses.to_vec(),
        deposit_contract: deposit_contract.to_string(),
    })
}

const NOT_A_BUNDLE: &str = "not a bundle directory";

/// `out_dir` may be absent, an empty directory, or a bundle for `preset`.
/// Anything else is left alone.
fn check_existing_bundle(out_dir: &Path, preset: &PresetConfig) -> Result<(), BundleError> {
    let metadata = match fs::symlink_metadata(out_dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(BundleError::not_writable(out_dir, e)),
    };
    if !metadata.is_dir() {
        warn!(out_dir = %out_dir.display(), "Refusing to replace a non-directory");
        return Err(BundleError::not_writable(out_dir, NOT_A_BUNDLE));
    }

    let config_path = out_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        let mut entries = fs::read_dir(out_dir).map_err(|e| BundleError::not_writable(out_dir, e))?;
        if entries.next().is_none() {
            return Ok(());
        }
        warn!(out_dir = %out_dir.display(), "Refusing to replace a directory without config.yaml");
        return Err(BundleError::not_writable(out_dir, NOT_A_BUNDLE));
    }

    let probe: PresetProbe = serde_yaml::from_str(&read_text(&config_path)?).map_err(|e| {
        BundleError::not_writable(out_dir, format!("{NOT_A_BUNDLE}: {CONFIG_FILE}: {e}"))
    })?;
    let existing = probe.network_name();
    if existing != preset.name.as_str() {
        warn!(
            existing = %existing,
            requested = %preset.name,
            "Refusing to replace bundle built for another preset"
        );
        return Err(BundleError::PresetMismatch {
            existing: existing.to_string(),
            requested: preset.name,
        });
    }
    Ok(())
}

/// Swap `staging` into `out_dir`.
fn publish(staging: &Path, out_dir: &Path) -> Result<(), BundleError> {
    if !out_dir.exists() {
        return fs::rename(staging, out_dir).map_err(|e| BundleError::not_writable(out_dir, e));
    }

    let old = sibling_path(out_dir, &format!("old-{}", std::process::id()))?;
    remove_dir_if_exists(&old)?;
    fs::rename(out_dir, &old).map_err(|e| BundleError::not_writable(out_dir, e))?;

    if let Err(e) = fs::rename(staging, out_dir) {
        if let Err(restore) = fs::rename(&old, out_dir) {
            error!(
                previous = %old.display(),
                out_dir = %out_dir.display(),
                error = %restore,
                "Failed to restore previous bundle"
            );
        }
        return Err(BundleError::not_writable(out_dir, e));
    }

    if let Err(e) = fs::remove_dir_all(&old) {
        warn!(path = %old.display(), error = %e, "Failed to remove replaced bundle");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_02_key_derivation::Seed;
    use bb_03_genesis_state::GenesisBuilder;

    const DEPOSIT_CONTRACT: &str = "0x16e82D77882A663454Ef92806b7DeCa1D394810f";

    fn genesis(preset: &PresetConfig, validators: u64) -> BeaconState {
        GenesisBuilder::new(Seed::parse("bundle-tests").unwrap())
            .build(validators, preset, 1_600_000_000)
            .unwrap()
    }

    fn boot() -> Vec<BootAddress> {
        vec![
            BootAddress::parse("/ip4/127.0.0.1/tcp/9000").unwrap(),
            BootAddress::parse("127.0.0.1:9001").unwrap(),
        ]
    }

    #[test]
    fn test_materialize_writes_all_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();
        let state = genesis(&preset, 4);

        let bundle = materialize(&state, &preset, &boot(), DEPOSIT_CONTRACT, &out_dir).unwrap();

        let encoded = fs::read(out_dir.join(GENESIS_STATE_FILE)).unwrap();
        assert_eq!(encoded, bundle.encoded_state);
        assert_eq!(BeaconState::decode(&encoded, &preset).unwrap(), state);

        let config = BundleConfig::from_yaml(
            &fs::read_to_string(out_dir.join(CONFIG_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(config.preset_base, "minimal");
        assert_eq!(config.genesis_time, 1_600_000_000);
        assert_eq!(config.validator_count, 4);
        assert_eq!(config.genesis_state_root, format_root(&bundle.genesis_state_root));

        let boot_yaml = fs::read_to_string(out_dir.join(BOOT_ENR_FILE)).unwrap();
        let parsed: Vec<BootAddress> = serde_yaml::from_str(&boot_yaml).unwrap();
        assert_eq!(parsed, boot());

        let contract = fs::read_to_string(out_dir.join(DEPOSIT_CONTRACT_FILE)).unwrap();
        assert_eq!(contract, format!("{DEPOSIT_CONTRACT}\n"));
    }

    #[test]
    fn test_no_staging_left_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();
        let state = genesis(&preset, 2);

        materialize(&state, &preset, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();
        materialize(&state, &preset, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();

        let mut entries: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        entries.sort();
        // the lock file is kept so every run locks the same inode
        assert_eq!(entries, vec!["testnet".to_string(), "testnet.lock".to_string()]);
    }

    #[test]
    fn test_regeneration_replaces_wholesale() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();

        materialize(&genesis(&preset, 2), &preset, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();
        fs::write(out_dir.join("stray.txt"), b"left over").unwrap();
        let bundle =
            materialize(&genesis(&preset, 3), &preset, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();

        assert_eq!(bundle.validator_count, 3);
        assert!(!out_dir.join("stray.txt").exists());
    }

    #[test]
    fn test_preset_mismatch_leaves_directory_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let mainnet = PresetConfig::mainnet();
        materialize(&genesis(&mainnet, 1), &mainnet, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();
        let before = fs::read(out_dir.join(GENESIS_STATE_FILE)).unwrap();

        let minimal = PresetConfig::minimal();
        let result = materialize(&genesis(&minimal, 1), &minimal, &[], DEPOSIT_CONTRACT, &out_dir);

        match result {
            Err(BundleError::PresetMismatch { existing, requested }) => {
                assert_eq!(existing, "mainnet");
                assert_eq!(requested, minimal.name);
            }
            other => panic!("expected PresetMismatch, got {:?}", other.map(|_| ())),
        }
        assert_eq!(fs::read(out_dir.join(GENESIS_STATE_FILE)).unwrap(), before);
    }

    #[test]
    fn test_foreign_directory_left_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("projects");
        fs::create_dir(&out_dir).unwrap();
        fs::write(out_dir.join("important.txt"), b"keep me").unwrap();
        let preset = PresetConfig::minimal();

        let result = materialize(&genesis(&preset, 1), &preset, &[], DEPOSIT_CONTRACT, &out_dir);

        match result {
            Err(BundleError::DirectoryNotWritable { reason, .. }) => {
                assert!(reason.contains("not a bundle directory"));
            }
            other => panic!("expected DirectoryNotWritable, got {:?}", other.map(|_| ())),
        }
        assert_eq!(fs::read(out_dir.join("important.txt")).unwrap(), b"keep me");
        assert!(!out_dir.join(GENESIS_STATE_FILE).exists());
    }

    #[test]
    fn test_unparseable_config_is_not_a_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        fs::create_dir(&out_dir).unwrap();
        fs::write(out_dir.join(CONFIG_FILE), b"just: [some, other, yaml]\n").unwrap();
        let preset = PresetConfig::minimal();

        let result = materialize(&genesis(&preset, 1), &preset, &[], DEPOSIT_CONTRACT, &out_dir);

        assert!(matches!(result, Err(BundleError::DirectoryNotWritable { .. })));
        assert!(out_dir.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_file_in_place_of_directory_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        fs::write(&out_dir, b"not a directory").unwrap();
        let preset = PresetConfig::minimal();

        let result = materialize(&genesis(&preset, 1), &preset, &[], DEPOSIT_CONTRACT, &out_dir);

        assert!(matches!(result, Err(BundleError::DirectoryNotWritable { .. })));
        assert_eq!(fs::read(&out_dir).unwrap(), b"not a directory");
    }

    #[test]
    fn test_empty_directory_is_filled() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        fs::create_dir(&out_dir).unwrap();
        let preset = PresetConfig::minimal();

        materialize(&genesis(&preset, 1), &preset, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();
        assert!(out_dir.join(GENESIS_STATE_FILE).is_file());
    }

    #[test]
    fn test_failed_swap_restores_previous_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();
        materialize(&genesis(&preset, 1), &preset, &[], DEPOSIT_CONTRACT, &out_dir).unwrap();
        let before = fs::read(out_dir.join(GENESIS_STATE_FILE)).unwrap();

        let result = publish(&tmp.path().join("testnet.staging-missing"), &out_dir);

        assert!(matches!(result, Err(BundleError::DirectoryNotWritable { .. })));
        assert_eq!(fs::read(out_dir.join(GENESIS_STATE_FILE)).unwrap(), before);
        assert!(!sibling_path(&out_dir, &format!("old-{}", std::process::id()))
            .unwrap()
            .exists());
    }

    #[test]
    fn test_state_must_fit_preset() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let state = genesis(&PresetConfig::minimal(), 1);

        let result = materialize(&state, &PresetConfig::mainnet(), &[], DEPOSIT_CONTRACT, &out_dir);
        assert!(matches!(result, Err(BundleError::Encode(_))));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_multiline_deposit_contract_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let preset = PresetConfig::minimal();
        let result = materialize(
            &genesis(&preset, 1),
            &preset,
            &[],
            "0xabc\n0xdef",
            &tmp.path().join("testnet"),
        );
        assert!(matches!(result, Err(BundleError::InvalidInput(_))));
    }

    #[test]
    fn test_locked_directory_is_not_writable() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("testnet");
        let preset = PresetConfig::minimal();

        let _held = BundleLock::acquire(&out_dir).unwrap();
        let result = materialize(&genesis(&preset, 1), &preset, &[], DEPOSIT_CONTRACT, &out_dir);
        assert!(matches!(result, Err(BundleError::DirectoryNotWritable { .. })));
    }
}
