//! # BB-05 Testnet Bundle
//!
//! Packages a genesis state for distribution and reads it back on the node
//! side.
//!
//! ## Bundle Layout
//!
//! | File | Content |
//! |------|---------|
//! | `genesis.ssz` | canonical encoding of the genesis state |
//! | `config.yaml` | `PRESET_BASE`, `CONFIG_NAME`, preset parameters, genesis time and roots |
//! | `boot_enr.yaml` | boot addresses, in order |
//! | `deposit_contract.txt` | deposit contract reference |
//!
//! ## Publication
//!
//! A bundle is written to `<out_dir>.staging-<pid>` under an exclusive lock
//! on `<out_dir>.lock` and renamed into place. Readers see either the
//! previous bundle or the new one, never a mix. Only an empty directory or
//! a bundle for the same network config is ever replaced.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod loader;
pub mod materializer;

pub use adapters::BundleLock;
pub use domain::{
    format_root, parse_root, BootAddress, BundleConfig, TestnetBundle, BOOT_ENR_FILE,
    CONFIG_FILE, DEPOSIT_CONTRACT_FILE, GENESIS_STATE_FILE,
};
pub use errors::BundleError;
pub use materializer::materialize;
