//! # Protocol Constants
//!
//! Values shared by every preset.

/// Epoch at which genesis validators are active.
pub const GENESIS_EPOCH: u64 = 0;

/// Slot of the genesis state.
pub const GENESIS_SLOT: u64 = 0;

/// Sentinel for "never" in epoch fields.
pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;

/// First byte of BLS withdrawal credentials.
pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;

/// Length of `BeaconState::justification_bits`.
pub const JUSTIFICATION_BITS_LENGTH: usize = 4;

/// Depth of the deposit contract's merkle tree.
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;

/// Block body operation limits.
pub const MAX_PROPOSER_SLASHINGS: usize = 16;
pub const MAX_ATTESTER_SLASHINGS: usize = 2;
pub const MAX_DEPOSITS: usize = 16;
pub const MAX_VOLUNTARY_EXITS: usize = 16;

/// Sizes of fixed byte fields.
pub const PUBKEY_BYTES: usize = 48;
pub const SIGNATURE_BYTES: usize = 96;
pub const VERSION_BYTES: usize = 4;
