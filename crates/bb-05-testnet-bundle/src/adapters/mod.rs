//! Adapters Layer - filesystem access

pub mod fs;
pub mod lock;

pub use lock::BundleLock;
