//! # Genesis Time Errors

use bb_01_binary_codec::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisTimeError {
    /// Adding the genesis delay overflowed a `u64`.
    #[error("Genesis time {now} + delay {delay} overflows")]
    Overflow { now: u64, delay: u64 },

    /// The encoded state did not decode under the given preset.
    #[error("Failed to decode genesis state: {0}")]
    Decode(#[from] DecodeError),

    /// The re-timed state could not be encoded.
    #[error("Failed to encode genesis state: {0}")]
    Encode(#[from] EncodeError),
}
