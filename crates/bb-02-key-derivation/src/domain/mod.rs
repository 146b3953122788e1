//! Domain Layer - seeds, derived keys and errors
//!
//! RULES:
//! - No I/O operations
//! - Derivation is a pure function of (seed, index)

pub mod entities;
pub mod errors;
pub mod seed;

pub use entities::ValidatorKey;
pub use errors::KeyDerivationError;
pub use seed::Seed;
