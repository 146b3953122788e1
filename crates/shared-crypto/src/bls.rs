//! BLS12-381 Key Implementation
//!
//! Provides BLS key primitives for:
//! - Deterministic key generation from input key material
//! - Public key serialization (48 bytes compressed)
//! - Sign/verify, used to check that derived keys are usable
//!
//! Used by bb-02-key-derivation for validator keys.

use blst::min_pk::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

use crate::CryptoError;

/// Domain separation tag for BLS signatures (Ethereum 2.0 compatible)
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Minimum input key material accepted by `KeyGen`.
const MIN_IKM_BYTES: usize = 32;

/// Compressed public key size.
pub const PUBLIC_KEY_BYTES: usize = 48;

/// BLS public key (48 bytes compressed)
#[derive(Clone, Debug)]
pub struct BlsPublicKey(PublicKey);

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsPublicKey {}

/// BLS signature (96 bytes)
#[derive(Clone, Debug)]
pub struct BlsSignature(Signature);

/// BLS key pair. `blst` zeroizes the secret scalar on drop.
pub struct BlsKeyPair {
    secret: SecretKey,
    public: BlsPublicKey,
}

impl BlsKeyPair {
    /// Derive a key pair from input key material.
    ///
    /// Deterministic: the same `ikm` always yields the same key pair.
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, CryptoError> {
        if ikm.len() < MIN_IKM_BYTES {
            return Err(CryptoError::IkmTooShort {
                min: MIN_IKM_BYTES,
                actual: ikm.len(),
            });
        }
        let secret = SecretKey::key_gen(ikm, &[])
            .map_err(|e| CryptoError::KeyGenerationFailed(format!("{e:?}")))?;
        let public = BlsPublicKey(secret.sk_to_pk());
        Ok(Self { secret, public })
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.secret.sign(message, DST, &[]))
    }

    /// Get the public key
    pub fn public_key(&self) -> BlsPublicKey {
        self.public.clone()
    }
}

impl BlsPublicKey {
    /// Verify a signature against this public key
    pub fn verify(&self, message: &[u8], signature: &BlsSignature) -> bool {
        signature.0.verify(true, message, DST, &[], &self.0, true) == BLST_ERROR::BLST_SUCCESS
    }

    /// Serialize to 48-byte compressed form
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.0.to_bytes()
    }
}
