//! # Bundle Errors

use std::path::PathBuf;

use bb_01_binary_codec::{DecodeError, EncodeError};
use shared_types::PresetName;
use thiserror::Error;

/// Errors writing or reading a testnet bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Any I/O failure on the output side, including a lock held elsewhere.
    #[error("Directory not writable: {path}: {reason}")]
    DirectoryNotWritable { path: PathBuf, reason: String },

    /// The output directory already holds a bundle for another preset.
    #[error("Preset mismatch: existing bundle is '{existing}', requested '{requested}'")]
    PresetMismatch {
        existing: String,
        requested: PresetName,
    },

    /// The bundle names the requested preset but records different
    /// parameters, e.g. a reduced validator registry limit.
    #[error("Preset mismatch: bundle records {key} = {recorded}, requested preset has {expected}")]
    PresetParameterMismatch {
        key: &'static str,
        recorded: String,
        expected: String,
    },

    /// A bundle file could not be read.
    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// Boot address or deposit contract rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The state did not fit its schema.
    #[error("Failed to encode genesis state: {0}")]
    Encode(#[from] EncodeError),

    /// `genesis.ssz` did not decode under the preset.
    #[error("Failed to decode genesis state: {0}")]
    Decode(#[from] DecodeError),

    /// YAML metadata could not be written or parsed.
    #[error("Bundle metadata error: {0}")]
    Metadata(#[from] serde_yaml::Error),

    /// Bundle files disagree with each other.
    #[error("Inconsistent bundle: {0}")]
    Inconsistent(String),
}

impl BundleError {
    pub(crate) fn not_writable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        BundleError::DirectoryNotWritable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn read_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        BundleError::ReadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
