//! # Seed Material
//!
//! The seed is the only secret shared by every run that must agree on a
//! validator set. Textual seeds starting with `0x` are hex; anything else
//! (a mnemonic phrase, a test label) is taken as its UTF-8 bytes.

use zeroize::Zeroize;

use super::errors::KeyDerivationError;

/// Seed bytes, zeroized on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Seed(Vec<u8>);

impl Seed {
    /// Wrap raw seed bytes. Fails on an empty seed.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyDerivationError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KeyDerivationError::InvalidSeed("seed is empty".into()));
        }
        Ok(Self(bytes))
    }

    /// Parse a seed given on the command line or in a config file.
    pub fn parse(text: &str) -> Result<Self, KeyDerivationError> {
        match text.strip_prefix("0x") {
            Some(hex_digits) => {
                let bytes = hex::decode(hex_digits)
                    .map_err(|e| KeyDerivationError::InvalidSeed(format!("bad hex: {e}")))?;
                Self::new(bytes)
            }
            None => Self::new(text.as_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seed({} bytes)", self.0.len())
    }
}
