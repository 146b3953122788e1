//! # Beacon Bootstrap Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/            # criterion benchmarks
//! └── src/
//!     ├── fixtures.rs     # shared seeds and builders
//!     └── integration/    # cross-crate scenarios
//!         ├── genesis_flow.rs
//!         └── bundle_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bb-tests
//! cargo test -p bb-tests integration::bundle_flow::
//! cargo bench -p bb-tests
//! ```

pub mod fixtures;
pub mod integration;
