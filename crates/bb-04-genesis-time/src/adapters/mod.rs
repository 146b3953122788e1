//! Adapters Layer - concrete time sources

pub mod time;

pub use time::{FixedTimeSource, SystemTimeSource};
