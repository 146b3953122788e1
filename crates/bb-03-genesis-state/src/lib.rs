//! # BB-03 Genesis State Builder
//!
//! Produces the phase-0 genesis `BeaconState` from a seed, a validator
//! count, a preset and a genesis time.
//!
//! ## Genesis Rules
//!
//! | Field | Value |
//! |-------|-------|
//! | `validators[i]` | key `i`, active at `GENESIS_EPOCH`, never exiting |
//! | `balances[i]` | `max_effective_balance` |
//! | `fork` | `genesis_fork_version` for both versions, epoch 0 |
//! | `eth1_data` | empty deposit root, `deposit_count = N`, configured block hash |
//! | `randao_mixes` | every entry is the eth1 block hash |
//! | `latest_block_header.body_root` | root of an empty block body |
//! | `genesis_validators_root` | root of the validator registry |
//!
//! ## Usage Example
//!
//! ```no_run
//! use bb_02_key_derivation::Seed;
//! use bb_03_genesis_state::GenesisBuilder;
//! use shared_types::PresetConfig;
//!
//! let builder = GenesisBuilder::new(Seed::parse("0x01").unwrap());
//! let state = builder
//!     .build(16, &PresetConfig::minimal(), 1_600_000_000)
//!     .unwrap();
//! assert_eq!(state.validators.len(), 16);
//! ```

pub mod builder;
pub mod errors;

pub use builder::{genesis_validators, GenesisBuilder, DEFAULT_ETH1_BLOCK_HASH};
pub use errors::GenesisError;
