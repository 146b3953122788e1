//! # Integration Scenarios
//!
//! Each module drives several crates together, the way the runtime does.

pub mod bundle_flow;
pub mod genesis_flow;
