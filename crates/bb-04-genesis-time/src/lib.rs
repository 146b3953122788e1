//! # BB-04 Genesis Time Injector
//!
//! Decides the genesis time once, for the whole network.
//!
//! ## Architecture
//!
//! - **Ports Layer** (`ports/`): `TimeSource`, the wall clock abstraction
//! - **Adapters Layer** (`adapters/`): system clock and a fixed clock
//! - **Service Layer** (`injector.rs`): resolution, rounding, re-timing
//!
//! ## Resolution Rules
//!
//! | Input | Genesis time |
//! |-------|--------------|
//! | `Some(t)` | `t`, verbatim |
//! | `None` | `now - now % seconds_per_slot + genesis_delay` |

pub mod adapters;
pub mod errors;
pub mod injector;
pub mod ports;

pub use adapters::{FixedTimeSource, SystemTimeSource};
pub use errors::GenesisTimeError;
pub use injector::{format_utc, inject_genesis_time, retime_encoded, GenesisTimeInjector};
pub use ports::TimeSource;
