//! # Key Deriver
//!
//! `ikm = SHA-256(DOMAIN || seed || index_le64)`, then BLS `KeyGen(ikm)`.
//! The index is folded in before the one-way key generation step, so keys
//! of different indices share nothing an observer could relate.

use std::time::Instant;

use rayon::prelude::*;
use shared_crypto::{sha256_many, BlsKeyPair};
use tracing::{debug, info};

use crate::domain::{KeyDerivationError, Seed, ValidatorKey};

/// Domain separation for validator key material.
pub const KEY_DERIVATION_DOMAIN: &[u8] = b"BEACON_BOOTSTRAP_VALIDATOR_KEY_V1";

/// Derives the keys of one run: a seed and a fixed validator count.
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    seed: Seed,
    validator_count: u64,
}

impl KeyDeriver {
    pub fn new(seed: Seed, validator_count: u64) -> Self {
        Self {
            seed,
            validator_count,
        }
    }

    pub fn validator_count(&self) -> u64 {
        self.validator_count
    }

    /// Derive the key for `index`.
    ///
    /// Pure: the same seed and index always give the same key.
    pub fn derive(&self, index: u64) -> Result<ValidatorKey, KeyDerivationError> {
        if index >= self.validator_count {
            return Err(KeyDerivationError::IndexOutOfRange {
                index,
                validator_count: self.validator_count,
            });
        }
        derive_key(&self.seed, index)
    }

    /// Derive every key of the run, ordered by index.
    ///
    /// With `parallel`, indices fan out over the rayon pool; results are
    /// still collected in index order.
    pub fn derive_all(&self, parallel: bool) -> Result<Vec<ValidatorKey>, KeyDerivationError> {
        let start = Instant::now();
        let keys = if parallel {
            (0..self.validator_count)
                .into_par_iter()
                .map(|index| derive_key(&self.seed, index))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            (0..self.validator_count)
                .map(|index| derive_key(&self.seed, index))
                .collect::<Result<Vec<_>, _>>()?
        };

        info!(
            count = keys.len(),
            parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Derived validator keys"
        );
        Ok(keys)
    }
}

/// Derive the key for `index` without a run bound.
pub fn derive_key(seed: &Seed, index: u64) -> Result<ValidatorKey, KeyDerivationError> {
    let ikm = sha256_many(&[KEY_DERIVATION_DOMAIN, seed.as_bytes(), &index.to_le_bytes()]);
    let keypair = BlsKeyPair::from_ikm(&ikm)?;
    let key = ValidatorKey::new(index, keypair);
    debug!(index, pubkey = %hex::encode(&key.pubkey()[..8]), "Derived key");
    Ok(key)
}
