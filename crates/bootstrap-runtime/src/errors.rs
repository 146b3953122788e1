//! # Runtime Errors and Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | any other failure |
//! | 2 | invalid configuration or usage |
//! | 10 | invalid seed |
//! | 11 | validator index out of range |
//! | 12 | validator count exceeds the preset |
//! | 13 | malformed encoded state |
//! | 14 | output directory not writable |
//! | 15 | preset mismatch |

use bb_01_binary_codec::DecodeError;
use bb_02_key_derivation::KeyDerivationError;
use bb_03_genesis_state::GenesisError;
use bb_04_genesis_time::GenesisTimeError;
use bb_05_testnet_bundle::BundleError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failure categories surfaced to the operator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    InvalidSeed(String),

    #[error("{0}")]
    IndexOutOfRange(String),

    #[error("{0}")]
    ValidatorCountExceedsPreset(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    DirectoryNotWritable(String),

    #[error("{0}")]
    PresetMismatch(String),

    #[error("{0}")]
    Other(String),
}

impl RuntimeError {
    /// Classify a command failure by the first typed error in its chain.
    pub fn classify(err: &anyhow::Error) -> Self {
        let category = err.chain().find_map(category_of).unwrap_or(RuntimeError::Other);
        category(format!("{err:#}"))
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RuntimeError::Usage(_) => 2,
            RuntimeError::InvalidSeed(_) => 10,
            RuntimeError::IndexOutOfRange(_) => 11,
            RuntimeError::ValidatorCountExceedsPreset(_) => 12,
            RuntimeError::Decode(_) => 13,
            RuntimeError::DirectoryNotWritable(_) => 14,
            RuntimeError::PresetMismatch(_) => 15,
            RuntimeError::Other(_) => 1,
        }
    }
}

type Category = fn(String) -> RuntimeError;

fn category_of(err: &(dyn std::error::Error + 'static)) -> Option<Category> {
    if err.is::<ConfigError>() {
        return Some(RuntimeError::Usage);
    }
    if let Some(e) = err.downcast_ref::<KeyDerivationError>() {
        return Some(key_category(e));
    }
    if let Some(e) = err.downcast_ref::<GenesisError>() {
        let category: Category = match e {
            GenesisError::NoValidators => RuntimeError::Usage,
            GenesisError::ValidatorCountExceedsPreset { .. } => {
                RuntimeError::ValidatorCountExceedsPreset
            }
            GenesisError::KeyDerivation(inner) => key_category(inner),
            GenesisError::Encode(_) => RuntimeError::Other,
        };
        return Some(category);
    }
    if let Some(e) = err.downcast_ref::<GenesisTimeError>() {
        let category: Category = match e {
            GenesisTimeError::Decode(_) => RuntimeError::Decode,
            GenesisTimeError::Overflow { .. } => RuntimeError::Usage,
            GenesisTimeError::Encode(_) => RuntimeError::Other,
        };
        return Some(category);
    }
    if let Some(e) = err.downcast_ref::<BundleError>() {
        let category: Category = match e {
            BundleError::DirectoryNotWritable { .. } => RuntimeError::DirectoryNotWritable,
            BundleError::PresetMismatch { .. } | BundleError::PresetParameterMismatch { .. } => {
                RuntimeError::PresetMismatch
            }
            BundleError::Decode(_) => RuntimeError::Decode,
            BundleError::InvalidInput(_) => RuntimeError::Usage,
            BundleError::ReadFailed { .. }
            | BundleError::Encode(_)
            | BundleError::Metadata(_)
            | BundleError::Inconsistent(_) => RuntimeError::Other,
        };
        return Some(category);
    }
    if err.is::<DecodeError>() {
        return Some(RuntimeError::Decode);
    }
    None
}

fn key_category(err: &KeyDerivationError) -> Category {
    match err {
        KeyDerivationError::InvalidSeed(_) => RuntimeError::InvalidSeed,
        KeyDerivationError::IndexOutOfRange { .. } => RuntimeError::IndexOutOfRange,
        KeyDerivationError::KeyGeneration(_) => RuntimeError::Other,
    }
}
