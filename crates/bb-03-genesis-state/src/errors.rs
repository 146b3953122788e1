//! # Genesis Errors

use bb_01_binary_codec::EncodeError;
use bb_02_key_derivation::KeyDerivationError;
use thiserror::Error;

/// Genesis state construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    /// A genesis state needs at least one validator.
    #[error("Validator count must be at least 1")]
    NoValidators,

    /// More validators than the registry list can hold.
    #[error("Validator count {requested} exceeds preset registry limit {limit}")]
    ValidatorCountExceedsPreset { requested: u64, limit: u64 },

    /// Deriving a validator key failed.
    #[error(transparent)]
    KeyDerivation(#[from] KeyDerivationError),

    /// A root could not be computed because a record did not fit its schema.
    #[error("Failed to hash genesis records: {0}")]
    Encode(#[from] EncodeError),
}
