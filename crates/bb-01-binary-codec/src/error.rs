//! Error types for the binary codec

use thiserror::Error;

/// A value could not be encoded because it does not fit its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Value does not match schema: expected {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("Integer {value} does not fit in {width} bytes")]
    IntegerOverflow { value: u64, width: usize },

    #[error("Unsupported integer width: {0}")]
    UnsupportedWidth(usize),

    #[error("Fixed-length value has {actual} elements, schema requires {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("List has {len} elements, schema allows at most {max}")]
    ListTooLong { len: usize, max: usize },

    #[error("Container has {actual} fields, schema declares {expected}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("Encoded size {0} exceeds the 4-byte offset range")]
    TooLarge(usize),
}

/// Malformed, truncated or non-canonical input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid byte length: got {len}, expected {expected}")]
    InvalidByteLength { len: usize, expected: usize },

    #[error("Input too short: got {len}, need at least {expected}")]
    TooShort { len: usize, expected: usize },

    #[error("Offset {offset} is out of bounds (length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Offsets decrease: {offset} follows {previous}")]
    OffsetsDecreasing { previous: usize, offset: usize },

    #[error("First offset {offset} does not match fixed region size {expected}")]
    FirstOffsetMismatch { offset: usize, expected: usize },

    #[error("Payload length {len} is not a multiple of element size {element_size}")]
    NotMultipleOfElementSize { len: usize, element_size: usize },

    #[error("List has {len} elements, schema allows at most {max}")]
    ListTooLong { len: usize, max: usize },

    #[error("Invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("Bitvector padding bits are not zero")]
    InvalidBitPadding,

    #[error("Bitlist is missing its delimiter bit")]
    MissingBitlistDelimiter,

    #[error("Unsupported integer width: {0}")]
    UnsupportedWidth(usize),

    #[error("Decoded value has unexpected shape: expected {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("Decoded record violates an invariant: {0}")]
    Inconsistent(String),
}
