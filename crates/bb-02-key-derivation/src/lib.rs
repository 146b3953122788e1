//! # BB-02 Deterministic Key Deriver
//!
//! Turns a shared seed and a validator index into a BLS key pair and its
//! withdrawal credentials. Independent runs with the same seed agree on
//! every key without talking to each other.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `Seed`, `ValidatorKey`, errors
//! - **Service Layer** (`deriver.rs`): `KeyDeriver` bound to one run's
//!   validator count, with optional rayon fan-out
//!
//! ## Security Notes
//!
//! - Seeds and secret keys are zeroized on drop
//! - `Debug` output never includes seed or secret bytes

pub mod deriver;
pub mod domain;

pub use deriver::{derive_key, KeyDeriver, KEY_DERIVATION_DOMAIN};
pub use domain::entities::withdrawal_credentials;
pub use domain::{KeyDerivationError, Seed, ValidatorKey};
