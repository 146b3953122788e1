//! # Shared Crypto - Key and Hash Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `bls` | BLS12-381 (min_pk) | Validator keys derived from seed material |
//! | `hashing` | SHA-256 | Key material, withdrawal credentials |
//!
//! ## Security Properties
//!
//! - **Secret keys** never leave `BlsKeyPair` and are zeroized on drop
//! - **Key generation** follows the IETF BLS `KeyGen` procedure, so equal
//!   input key material always yields the same key pair

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod errors;
pub mod hashing;

// Re-exports
pub use bls::{BlsKeyPair, BlsPublicKey, BlsSignature, PUBLIC_KEY_BYTES};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Hash};
