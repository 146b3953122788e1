//! # Merkleization
//!
//! `hash_tree_root` commits to a value under its schema with SHA-256:
//!
//! - basic values and basic sequences are packed into 32-byte chunks
//! - composite values contribute one root per element or field
//! - chunks are merkleized into a tree padded to the schema's chunk limit
//! - lists and bitlists mix their length into the final root

use std::sync::OnceLock;

use sha2::{Digest, Sha256};

use crate::domain::{Schema, Value};
use crate::encode::{encoded_len, pack_bits, write};
use crate::error::EncodeError;

/// Size of a merkle leaf.
pub const BYTES_PER_CHUNK: usize = 32;

/// Deepest supported tree.
const MAX_DEPTH: usize = 64;

/// A 32-byte merkle root.
pub type Root = [u8; 32];

/// Root of an all-zero subtree of the given depth.
///
/// `zero_hash(0)` is the zero chunk; depths past 64 are clamped.
pub fn zero_hash(depth: usize) -> Root {
    static LADDER: OnceLock<Vec<Root>> = OnceLock::new();
    let ladder = LADDER.get_or_init(|| {
        let mut ladder = vec![[0u8; 32]; MAX_DEPTH + 1];
        for i in 1..=MAX_DEPTH {
            ladder[i] = hash_pair(&ladder[i - 1], &ladder[i - 1]);
        }
        ladder
    });
    ladder[depth.min(MAX_DEPTH)]
}

/// Compute the hash tree root of `value` under `schema`.
///
/// The value is shape-checked first, so anything `encode` rejects is
/// rejected here with the same error.
pub fn hash_tree_root(value: &Value, schema: &Schema) -> Result<Root, EncodeError> {
    encoded_len(value, schema)?;
    root_of(value, schema)
}

fn root_of(value: &Value, schema: &Schema) -> Result<Root, EncodeError> {
    let root = match (value, schema) {
        (Value::Uint(_) | Value::Bool(_), Schema::Uint(_) | Schema::Bool) => {
            let mut bytes = Vec::with_capacity(8);
            write(value, schema, &mut bytes)?;
            merkleize(pack_bytes(&bytes), None)
        }
        (Value::Bytes(bytes), Schema::ByteVector(_)) => merkleize(pack_bytes(bytes), None),
        (Value::Bytes(bytes), Schema::ByteList(max)) => mix_in_length(
            &merkleize(pack_bytes(bytes), Some(max.div_ceil(BYTES_PER_CHUNK))),
            bytes.len(),
        ),
        (Value::Bits(bits), Schema::Bitvector(n)) => merkleize(
            pack_bytes(&pack_bits(bits, false)),
            Some(n.div_ceil(BYTES_PER_CHUNK * 8)),
        ),
        (Value::Bits(bits), Schema::Bitlist(max)) => mix_in_length(
            &merkleize(
                pack_bytes(&pack_bits(bits, false)),
                Some(max.div_ceil(BYTES_PER_CHUNK * 8)),
            ),
            bits.len(),
        ),
        (Value::Sequence(items), Schema::Vector(element, n)) => {
            let limit = chunk_limit(element, *n);
            merkleize(element_chunks(items, element)?, Some(limit))
        }
        (Value::Sequence(items), Schema::List(element, max)) => {
            let limit = chunk_limit(element, *max);
            mix_in_length(
                &merkleize(element_chunks(items, element)?, Some(limit)),
                items.len(),
            )
        }
        (Value::Container(values), Schema::Container(fields)) => {
            let roots = values
                .iter()
                .zip(fields)
                .map(|(value, field)| root_of(value, &field.schema))
                .collect::<Result<Vec<_>, _>>()?;
            merkleize(roots, None)
        }
        _ => {
            return Err(EncodeError::TypeMismatch {
                expected: schema.kind(),
            })
        }
    };
    Ok(root)
}

/// Leaves of a vector or list: packed serialization for basic elements,
/// one root per element otherwise.
fn element_chunks(items: &[Value], element: &Schema) -> Result<Vec<Root>, EncodeError> {
    if element.is_basic() {
        let mut bytes = Vec::new();
        for item in items {
            write(item, element, &mut bytes)?;
        }
        Ok(pack_bytes(&bytes))
    } else {
        items.iter().map(|item| root_of(item, element)).collect()
    }
}

/// Maximum leaf count for `n` elements of `element`.
fn chunk_limit(element: &Schema, n: usize) -> usize {
    match element.fixed_size() {
        Some(size) if element.is_basic() => (n * size).div_ceil(BYTES_PER_CHUNK),
        _ => n,
    }
}

/// Split `bytes` into zero-padded 32-byte chunks.
pub(crate) fn pack_bytes(bytes: &[u8]) -> Vec<Root> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|chunk| {
            let mut root = [0u8; 32];
            root[..chunk.len()].copy_from_slice(chunk);
            root
        })
        .collect()
}

/// Merkleize `chunks` into a tree sized for `limit` leaves (or exactly the
/// chunk count when no limit applies). Missing leaves are zero chunks.
pub(crate) fn merkleize(chunks: Vec<Root>, limit: Option<usize>) -> Root {
    let leaves = limit.unwrap_or(chunks.len()).max(chunks.len());
    let depth = leaves.next_power_of_two().trailing_zeros() as usize;
    if chunks.is_empty() {
        return zero_hash(depth);
    }

    let mut layer = chunks;
    for level in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(zero_hash(level));
        }
        layer = layer
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    layer[0]
}

/// Mix a list length into its content root.
pub fn mix_in_length(root: &Root, len: usize) -> Root {
    let mut length = [0u8; 32];
    length[..8].copy_from_slice(&(len as u64).to_le_bytes());
    hash_pair(root, &length)
}

fn hash_pair(left: &Root, right: &Root) -> Root {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}
