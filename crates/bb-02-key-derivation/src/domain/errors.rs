//! # Key Derivation Errors

use thiserror::Error;

/// Errors that can occur while deriving validator keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyDerivationError {
    /// Seed is empty or could not be parsed
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Requested index is not part of this run
    #[error("Validator index {index} out of range for a run of {validator_count} validators")]
    IndexOutOfRange { index: u64, validator_count: u64 },

    /// The BLS backend refused the key material
    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] shared_crypto::CryptoError),
}
