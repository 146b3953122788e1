//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Input key material shorter than `KeyGen` accepts
    #[error("Input key material too short: need at least {min} bytes, got {actual}")]
    IkmTooShort {
        /// Minimum IKM length in bytes
        min: usize,
        /// Actual IKM length in bytes
        actual: usize,
    },

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
}
