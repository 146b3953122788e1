//! # Shared Types Crate
//!
//! Beacon state records and the presets that size them.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every crate encodes, decodes and hashes
//!   states through the schemas defined here.
//! - **Preset-parameterized**: records carry no sizes of their own; each
//!   `schema(preset)` call fixes vector lengths and list limits.

pub mod beacon;
pub mod block_body;
pub mod constants;
pub mod errors;
pub mod preset;

pub use beacon::*;
pub use block_body::{empty_block_body_root, empty_deposit_root};
pub use constants::*;
pub use errors::*;
pub use preset::{PresetConfig, PresetName};
