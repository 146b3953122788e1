//! # BB-01 Binary Codec
//!
//! Canonical binary encoding for every record that ends up in a genesis bundle.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the explicit schema description and the
//!   dynamic value tree it validates
//! - `encode`: two-pass encoder (sizes and offsets first, then layout)
//! - `decode`: strict single-pass decoder that rejects any non-canonical input
//! - `merkle`: SHA-256 merkleization (`hash_tree_root`)
//! - `typed`: bridge between Rust records and the dynamic value tree
//!
//! ## Encoding Rules
//!
//! | Schema | Encoding |
//! |--------|----------|
//! | `Uint(w)` | `w` bytes, little-endian |
//! | `Bool` | one byte, `0x00` or `0x01` |
//! | `ByteVector(n)` / `Vector(e, n)` | concatenation, no length prefix |
//! | `ByteList` / `List` / `Bitlist` | variable, referenced by a 4-byte offset |
//! | `Container` | fixed region (values + offsets), then variable payloads |
//!
//! ## Invariants
//!
//! - **Round-trip**: `decode(encode(v, s), s) == v` for every value valid under `s`
//! - **Canonical**: any byte string accepted by `decode` re-encodes to itself
//!
//! ## Usage Example
//!
//! ```
//! use bb_01_binary_codec::{decode, encode, Schema, Value};
//!
//! let schema = Schema::container(vec![
//!     ("slot", Schema::uint64()),
//!     ("roots", Schema::list(Schema::bytes32(), 16)),
//! ]);
//! let value = Value::Container(vec![
//!     Value::Uint(7),
//!     Value::Sequence(vec![Value::Bytes(vec![0xAA; 32])]),
//! ]);
//!
//! let bytes = encode(&value, &schema).unwrap();
//! assert_eq!(decode(&bytes, &schema).unwrap(), value);
//! ```

pub mod decode;
pub mod domain;
pub mod encode;
pub mod error;
pub mod merkle;
pub mod typed;

pub use decode::decode;
pub use domain::{Field, Schema, Value, BYTES_PER_OFFSET};
pub use encode::{encode, encoded_len};
pub use error::{DecodeError, EncodeError};
pub use merkle::{hash_tree_root, mix_in_length, zero_hash, Root, BYTES_PER_CHUNK};
pub use typed::{decode_typed, encode_typed, BitField, FieldReader, FromValue, ToValue};
