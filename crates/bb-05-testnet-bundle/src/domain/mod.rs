//! Domain Layer - bundle records and metadata
//!
//! RULES:
//! - No I/O operations
//! - A bundle is immutable once materialized

pub mod boot_address;
pub mod bundle;
pub mod metadata;

pub use boot_address::BootAddress;
pub use bundle::{
    TestnetBundle, BOOT_ENR_FILE, CONFIG_FILE, DEPOSIT_CONTRACT_FILE, GENESIS_STATE_FILE,
};
pub use metadata::{format_root, parse_root, BundleConfig};
