//! # Beacon State Records
//!
//! Phase-0 records in their canonical field order. Each record pairs a
//! `schema` (sized by the preset where needed) with conversions to and
//! from the codec's value tree; the field order of both must match.

use bb_01_binary_codec::{
    hash_tree_root, BitField, DecodeError, EncodeError, FieldReader, FromValue, Root, Schema,
    ToValue, Value,
};

use crate::constants::{JUSTIFICATION_BITS_LENGTH, PUBKEY_BYTES, VERSION_BYTES};
use crate::preset::PresetConfig;

/// A 32-byte root.
pub type Hash = [u8; 32];

/// A 48-byte compressed BLS public key.
pub type PublicKeyBytes = [u8; 48];

/// A 4-byte fork version.
pub type Version = [u8; 4];

// =============================================================================
// SMALL RECORDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    pub epoch: u64,
}

impl Fork {
    pub fn schema() -> Schema {
        Schema::container(vec![
            ("previous_version", Schema::byte_vector(VERSION_BYTES)),
            ("current_version", Schema::byte_vector(VERSION_BYTES)),
            ("epoch", Schema::uint64()),
        ])
    }
}

impl ToValue for Fork {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.previous_version.to_value(),
            self.current_version.to_value(),
            self.epoch.to_value(),
        ])
    }
}

impl FromValue for Fork {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "Fork")?;
        let fork = Self {
            previous_version: r.field()?,
            current_version: r.field()?,
            epoch: r.field()?,
        };
        r.finish()?;
        Ok(fork)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checkpoint {
    pub epoch: u64,
    pub root: Hash,
}

impl Checkpoint {
    pub fn schema() -> Schema {
        Schema::container(vec![("epoch", Schema::uint64()), ("root", Schema::bytes32())])
    }
}

impl ToValue for Checkpoint {
    fn to_value(&self) -> Value {
        Value::Container(vec![self.epoch.to_value(), self.root.to_value()])
    }
}

impl FromValue for Checkpoint {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "Checkpoint")?;
        let checkpoint = Self {
            epoch: r.field()?,
            root: r.field()?,
        };
        r.finish()?;
        Ok(checkpoint)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeaconBlockHeader {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Hash,
    pub state_root: Hash,
    pub body_root: Hash,
}

impl BeaconBlockHeader {
    pub fn schema() -> Schema {
        Schema::container(vec![
            ("slot", Schema::uint64()),
            ("proposer_index", Schema::uint64()),
            ("parent_root", Schema::bytes32()),
            ("state_root", Schema::bytes32()),
            ("body_root", Schema::bytes32()),
        ])
    }
}

impl ToValue for BeaconBlockHeader {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.slot.to_value(),
            self.proposer_index.to_value(),
            self.parent_root.to_value(),
            self.state_root.to_value(),
            self.body_root.to_value(),
        ])
    }
}

impl FromValue for BeaconBlockHeader {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "BeaconBlockHeader")?;
        let header = Self {
            slot: r.field()?,
            proposer_index: r.field()?,
            parent_root: r.field()?,
            state_root: r.field()?,
            body_root: r.field()?,
        };
        r.finish()?;
        Ok(header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eth1Data {
    pub deposit_root: Hash,
    pub deposit_count: u64,
    pub block_hash: Hash,
}

impl Eth1Data {
    pub fn schema() -> Schema {
        Schema::container(vec![
            ("deposit_root", Schema::bytes32()),
            ("deposit_count", Schema::uint64()),
            ("block_hash", Schema::bytes32()),
        ])
    }
}

impl ToValue for Eth1Data {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.deposit_root.to_value(),
            self.deposit_count.to_value(),
            self.block_hash.to_value(),
        ])
    }
}

impl FromValue for Eth1Data {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "Eth1Data")?;
        let data = Self {
            deposit_root: r.field()?,
            deposit_count: r.field()?,
            block_hash: r.field()?,
        };
        r.finish()?;
        Ok(data)
    }
}

// =============================================================================
// VALIDATOR REGISTRY
// =============================================================================

/// A registry entry. Its position in `BeaconState::validators` is its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash,
    /// Gwei.
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_eligibility_epoch: u64,
    pub activation_epoch: u64,
    pub exit_epoch: u64,
    pub withdrawable_epoch: u64,
}

impl Validator {
    pub fn schema() -> Schema {
        Schema::container(vec![
            ("pubkey", Schema::byte_vector(PUBKEY_BYTES)),
            ("withdrawal_credentials", Schema::bytes32()),
            ("effective_balance", Schema::uint64()),
            ("slashed", Schema::boolean()),
            ("activation_eligibility_epoch", Schema::uint64()),
            ("activation_epoch", Schema::uint64()),
            ("exit_epoch", Schema::uint64()),
            ("withdrawable_epoch", Schema::uint64()),
        ])
    }

    /// `List[Validator, VALIDATOR_REGISTRY_LIMIT]`.
    pub fn registry_schema(preset: &PresetConfig) -> Schema {
        Schema::list(Self::schema(), preset.validator_registry_limit)
    }
}

impl ToValue for Validator {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.pubkey.to_value(),
            self.withdrawal_credentials.to_value(),
            self.effective_balance.to_value(),
            self.slashed.to_value(),
            self.activation_eligibility_epoch.to_value(),
            self.activation_epoch.to_value(),
            self.exit_epoch.to_value(),
            self.withdrawable_epoch.to_value(),
        ])
    }
}

impl FromValue for Validator {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "Validator")?;
        let validator = Self {
            pubkey: r.field()?,
            withdrawal_credentials: r.field()?,
            effective_balance: r.field()?,
            slashed: r.field()?,
            activation_eligibility_epoch: r.field()?,
            activation_epoch: r.field()?,
            exit_epoch: r.field()?,
            withdrawable_epoch: r.field()?,
        };
        r.finish()?;
        Ok(validator)
    }
}

/// Root of the validator registry, i.e. `genesis_validators_root`.
pub fn validators_root(
    validators: &[Validator],
    preset: &PresetConfig,
) -> Result<Root, EncodeError> {
    let value = Value::Sequence(validators.iter().map(ToValue::to_value).collect());
    hash_tree_root(&value, &Validator::registry_schema(preset))
}

// =============================================================================
// ATTESTATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttestationData {
    pub slot: u64,
    pub index: u64,
    pub beacon_block_root: Hash,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

impl AttestationData {
    pub fn schema() -> Schema {
        Schema::container(vec![
            ("slot", Schema::uint64()),
            ("index", Schema::uint64()),
            ("beacon_block_root", Schema::bytes32()),
            ("source", Checkpoint::schema()),
            ("target", Checkpoint::schema()),
        ])
    }
}

impl ToValue for AttestationData {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.slot.to_value(),
            self.index.to_value(),
            self.beacon_block_root.to_value(),
            self.source.to_value(),
            self.target.to_value(),
        ])
    }
}

impl FromValue for AttestationData {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "AttestationData")?;
        let data = Self {
            slot: r.field()?,
            index: r.field()?,
            beacon_block_root: r.field()?,
            source: r.field()?,
            target: r.field()?,
        };
        r.finish()?;
        Ok(data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingAttestation {
    pub aggregation_bits: BitField,
    pub data: AttestationData,
    pub inclusion_delay: u64,
    pub proposer_index: u64,
}

impl PendingAttestation {
    pub fn schema(preset: &PresetConfig) -> Schema {
        Schema::container(vec![
            ("aggregation_bits", Schema::bitlist(preset.max_validators_per_committee)),
            ("data", AttestationData::schema()),
            ("inclusion_delay", Schema::uint64()),
            ("proposer_index", Schema::uint64()),
        ])
    }
}

impl ToValue for PendingAttestation {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.aggregation_bits.to_value(),
            self.data.to_value(),
            self.inclusion_delay.to_value(),
            self.proposer_index.to_value(),
        ])
    }
}

impl FromValue for PendingAttestation {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "PendingAttestation")?;
        let attestation = Self {
            aggregation_bits: r.field()?,
            data: r.field()?,
            inclusion_delay: r.field()?,
            proposer_index: r.field()?,
        };
        r.finish()?;
        Ok(attestation)
    }
}

// =============================================================================
// BEACON STATE
// =============================================================================

/// The phase-0 beacon state.
///
/// Fixed vectors (`block_roots`, `state_roots`, `randao_mixes`,
/// `slashings`, `justification_bits`) must hold exactly their preset
/// length; lists must stay within their preset limit. The encoder enforces
/// both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconState {
    pub genesis_time: u64,
    pub genesis_validators_root: Hash,
    pub slot: u64,
    pub fork: Fork,
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: Vec<Hash>,
    pub state_roots: Vec<Hash>,
    pub historical_roots: Vec<Hash>,
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: Vec<Eth1Data>,
    pub eth1_deposit_index: u64,
    pub validators: Vec<Validator>,
    pub balances: Vec<u64>,
    pub randao_mixes: Vec<Hash>,
    pub slashings: Vec<u64>,
    pub previous_epoch_attestations: Vec<PendingAttestation>,
    pub current_epoch_attestations: Vec<PendingAttestation>,
    pub justification_bits: BitField,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl BeaconState {
    pub fn schema(preset: &PresetConfig) -> Schema {
        Schema::container(vec![
            ("genesis_time", Schema::uint64()),
            ("genesis_validators_root", Schema::bytes32()),
            ("slot", Schema::uint64()),
            ("fork", Fork::schema()),
            ("latest_block_header", BeaconBlockHeader::schema()),
            (
                "block_roots",
                Schema::vector(Schema::bytes32(), preset.slots_per_historical_root),
            ),
            (
                "state_roots",
                Schema::vector(Schema::bytes32(), preset.slots_per_historical_root),
            ),
            (
                "historical_roots",
                Schema::list(Schema::bytes32(), preset.historical_roots_limit),
            ),
            ("eth1_data", Eth1Data::schema()),
            (
                "eth1_data_votes",
                Schema::list(Eth1Data::schema(), preset.eth1_data_votes_limit()),
            ),
            ("eth1_deposit_index", Schema::uint64()),
            ("validators", Validator::registry_schema(preset)),
            (
                "balances",
                Schema::list(Schema::uint64(), preset.validator_registry_limit),
            ),
            (
                "randao_mixes",
                Schema::vector(Schema::bytes32(), preset.epochs_per_historical_vector),
            ),
            (
                "slashings",
                Schema::vector(Schema::uint64(), preset.epochs_per_slashings_vector),
            ),
            (
                "previous_epoch_attestations",
                Schema::list(
                    PendingAttestation::schema(preset),
                    preset.pending_attestations_limit(),
                ),
            ),
            (
                "current_epoch_attestations",
                Schema::list(
                    PendingAttestation::schema(preset),
                    preset.pending_attestations_limit(),
                ),
            ),
            ("justification_bits", Schema::bitvector(JUSTIFICATION_BITS_LENGTH)),
            ("previous_justified_checkpoint", Checkpoint::schema()),
            ("current_justified_checkpoint", Checkpoint::schema()),
            ("finalized_checkpoint", Checkpoint::schema()),
        ])
    }

    /// Canonical encoding under `preset`.
    pub fn encode(&self, preset: &PresetConfig) -> Result<Vec<u8>, EncodeError> {
        bb_01_binary_codec::encode_typed(self, &Self::schema(preset))
    }

    /// Strict decoding under `preset`.
    pub fn decode(bytes: &[u8], preset: &PresetConfig) -> Result<Self, DecodeError> {
        bb_01_binary_codec::decode_typed(bytes, &Self::schema(preset))
    }

    /// Hash tree root under `preset`.
    pub fn hash_tree_root(&self, preset: &PresetConfig) -> Result<Root, EncodeError> {
        hash_tree_root(&self.to_value(), &Self::schema(preset))
    }
}

impl ToValue for BeaconState {
    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.genesis_time.to_value(),
            self.genesis_validators_root.to_value(),
            self.slot.to_value(),
            self.fork.to_value(),
            self.latest_block_header.to_value(),
            self.block_roots.to_value(),
            self.state_roots.to_value(),
            self.historical_roots.to_value(),
            self.eth1_data.to_value(),
            self.eth1_data_votes.to_value(),
            self.eth1_deposit_index.to_value(),
            self.validators.to_value(),
            self.balances.to_value(),
            self.randao_mixes.to_value(),
            self.slashings.to_value(),
            self.previous_epoch_attestations.to_value(),
            self.current_epoch_attestations.to_value(),
            self.justification_bits.to_value(),
            self.previous_justified_checkpoint.to_value(),
            self.current_justified_checkpoint.to_value(),
            self.finalized_checkpoint.to_value(),
        ])
    }
}

impl FromValue for BeaconState {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(value, "BeaconState")?;
        let state = Self {
            genesis_time: r.field()?,
            genesis_validators_root: r.field()?,
            slot: r.field()?,
            fork: r.field()?,
            latest_block_header: r.field()?,
            block_roots: r.field()?,
            state_roots: r.field()?,
            historical_roots: r.field()?,
            eth1_data: r.field()?,
            eth1_data_votes: r.field()?,
            eth1_deposit_index: r.field()?,
            validators: r.field()?,
            balances: r.field()?,
            randao_mixes: r.field()?,
            slashings: r.field()?,
            previous_epoch_attestations: r.field()?,
            current_epoch_attestations: r.field()?,
            justification_bits: r.field()?,
            previous_justified_checkpoint: r.field()?,
            current_justified_checkpoint: r.field()?,
            finalized_checkpoint: r.field()?,
        };
        r.finish()?;
        Ok(state)
    }
}
