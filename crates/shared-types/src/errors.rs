//! # Error Types

use thiserror::Error;

/// Errors resolving a preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    /// No preset with this name exists.
    #[error("Unknown preset '{0}': expected 'minimal' or 'mainnet'")]
    Unknown(String),
}
