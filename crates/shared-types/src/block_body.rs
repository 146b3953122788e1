//! # Block Body Schema
//!
//! Genesis never carries a block, but its latest header commits to the root
//! of an empty `BeaconBlockBody`, and `eth1_data.deposit_root` commits to an
//! empty deposit list. Only schemas and empty values are needed here.

use bb_01_binary_codec::{hash_tree_root, EncodeError, Root, Schema, Value};

use crate::beacon::{AttestationData, BeaconBlockHeader, Eth1Data};
use crate::constants::{
    DEPOSIT_CONTRACT_TREE_DEPTH, MAX_ATTESTER_SLASHINGS, MAX_DEPOSITS, MAX_PROPOSER_SLASHINGS,
    MAX_VOLUNTARY_EXITS, PUBKEY_BYTES, SIGNATURE_BYTES,
};
use crate::preset::PresetConfig;

fn signature() -> Schema {
    Schema::byte_vector(SIGNATURE_BYTES)
}

fn signed_block_header() -> Schema {
    Schema::container(vec![
        ("message", BeaconBlockHeader::schema()),
        ("signature", signature()),
    ])
}

fn indexed_attestation(preset: &PresetConfig) -> Schema {
    Schema::container(vec![
        (
            "attesting_indices",
            Schema::list(Schema::uint64(), preset.max_validators_per_committee),
        ),
        ("data", AttestationData::schema()),
        ("signature", signature()),
    ])
}

fn attestation(preset: &PresetConfig) -> Schema {
    Schema::container(vec![
        ("aggregation_bits", Schema::bitlist(preset.max_validators_per_committee)),
        ("data", AttestationData::schema()),
        ("signature", signature()),
    ])
}

/// `DepositData`: what the deposit contract logs per deposit.
pub fn deposit_data_schema() -> Schema {
    Schema::container(vec![
        ("pubkey", Schema::byte_vector(PUBKEY_BYTES)),
        ("withdrawal_credentials", Schema::bytes32()),
        ("amount", Schema::uint64()),
        ("signature", signature()),
    ])
}

fn deposit() -> Schema {
    Schema::container(vec![
        (
            "proof",
            Schema::vector(Schema::bytes32(), DEPOSIT_CONTRACT_TREE_DEPTH + 1),
        ),
        ("data", deposit_data_schema()),
    ])
}

fn signed_voluntary_exit() -> Schema {
    Schema::container(vec![
        (
            "message",
            Schema::container(vec![
                ("epoch", Schema::uint64()),
                ("validator_index", Schema::uint64()),
            ]),
        ),
        ("signature", signature()),
    ])
}

/// Phase-0 `BeaconBlockBody`.
pub fn block_body_schema(preset: &PresetConfig) -> Schema {
    Schema::container(vec![
        ("randao_reveal", signature()),
        ("eth1_data", Eth1Data::schema()),
        ("graffiti", Schema::bytes32()),
        (
            "proposer_slashings",
            Schema::list(
                Schema::container(vec![
                    ("signed_header_1", signed_block_header()),
                    ("signed_header_2", signed_block_header()),
                ]),
                MAX_PROPOSER_SLASHINGS,
            ),
        ),
        (
            "attester_slashings",
            Schema::list(
                Schema::container(vec![
                    ("attestation_1", indexed_attestation(preset)),
                    ("attestation_2", indexed_attestation(preset)),
                ]),
                MAX_ATTESTER_SLASHINGS,
            ),
        ),
        (
            "attestations",
            Schema::list(attestation(preset), preset.max_attestations),
        ),
        ("deposits", Schema::list(deposit(), MAX_DEPOSITS)),
        (
            "voluntary_exits",
            Schema::list(signed_voluntary_exit(), MAX_VOLUNTARY_EXITS),
        ),
    ])
}

/// A block body with zeroed fixed fields and no operations.
pub fn empty_block_body() -> Value {
    Value::Container(vec![
        Value::Bytes(vec![0; SIGNATURE_BYTES]),
        Value::Container(vec![
            Value::Bytes(vec![0; 32]),
            Value::Uint(0),
            Value::Bytes(vec![0; 32]),
        ]),
        Value::Bytes(vec![0; 32]),
        Value::empty_list(),
        Value::empty_list(),
        Value::empty_list(),
        Value::empty_list(),
        Value::empty_list(),
    ])
}

/// Root of [`empty_block_body`], the genesis header's `body_root`.
pub fn empty_block_body_root(preset: &PresetConfig) -> Result<Root, EncodeError> {
    hash_tree_root(&empty_block_body(), &block_body_schema(preset))
}

/// Root of an empty `List[DepositData, 2**DEPOSIT_CONTRACT_TREE_DEPTH]`.
pub fn empty_deposit_root() -> Result<Root, EncodeError> {
    let schema = Schema::list(deposit_data_schema(), 1 << DEPOSIT_CONTRACT_TREE_DEPTH);
    hash_tree_root(&Value::empty_list(), &schema)
}
