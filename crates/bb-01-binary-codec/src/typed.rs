//! # Typed bridge
//!
//! Records are defined as ordinary Rust structs and convert to and from the
//! dynamic [`Value`] tree. Layout lives in the schema, never in the struct,
//! so the same record can be checked against different preset sizes.

use crate::decode::decode;
use crate::domain::{Schema, Value};
use crate::encode::encode;
use crate::error::{DecodeError, EncodeError};

/// Convert a record into its value tree.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Rebuild a record from a decoded value tree.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

/// Encode a record under `schema`.
pub fn encode_typed<T: ToValue>(record: &T, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    encode(&record.to_value(), schema)
}

/// Decode bytes under `schema` straight into a record.
pub fn decode_typed<T: FromValue>(bytes: &[u8], schema: &Schema) -> Result<T, DecodeError> {
    T::from_value(decode(bytes, schema)?)
}

impl ToValue for u64 {
    fn to_value(&self) -> Value {
        Value::Uint(*self)
    }
}

impl FromValue for u64 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Uint(v) => Ok(v),
            _ => Err(DecodeError::TypeMismatch { expected: "uint" }),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(DecodeError::TypeMismatch { expected: "bool" }),
        }
    }
}

impl<const N: usize> ToValue for [u8; N] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl<const N: usize> FromValue for [u8; N] {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bytes(bytes) => {
                let len = bytes.len();
                bytes
                    .try_into()
                    .map_err(|_| DecodeError::InvalidByteLength { len, expected: N })
            }
            _ => Err(DecodeError::TypeMismatch {
                expected: "byte vector",
            }),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            _ => Err(DecodeError::TypeMismatch { expected: "list" }),
        }
    }
}

/// Bits of a bitvector or bitlist, index 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitField(pub Vec<bool>);

impl BitField {
    pub fn zeroed(len: usize) -> Self {
        Self(vec![false; len])
    }
}

impl ToValue for BitField {
    fn to_value(&self) -> Value {
        Value::Bits(self.0.clone())
    }
}

impl FromValue for BitField {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bits(bits) => Ok(Self(bits)),
            _ => Err(DecodeError::TypeMismatch {
                expected: "bitfield",
            }),
        }
    }
}

/// Reads container fields in declared order.
///
/// ```
/// use bb_01_binary_codec::{FieldReader, Value};
///
/// let value = Value::Container(vec![Value::Uint(3), Value::Bool(true)]);
/// let mut reader = FieldReader::new(value, "Example").unwrap();
/// let epoch: u64 = reader.field().unwrap();
/// let flag: bool = reader.field().unwrap();
/// reader.finish().unwrap();
/// assert_eq!((epoch, flag), (3, true));
/// ```
pub struct FieldReader {
    name: &'static str,
    values: std::vec::IntoIter<Value>,
}

impl FieldReader {
    pub fn new(value: Value, name: &'static str) -> Result<Self, DecodeError> {
        match value {
            Value::Container(values) => Ok(Self {
                name,
                values: values.into_iter(),
            }),
            _ => Err(DecodeError::TypeMismatch {
                expected: "container",
            }),
        }
    }

    /// Take the next field.
    pub fn field<T: FromValue>(&mut self) -> Result<T, DecodeError> {
        let value = self.values.next().ok_or_else(|| {
            DecodeError::Inconsistent(format!("{} is missing fields", self.name))
        })?;
        T::from_value(value)
    }

    /// Fail if fields remain unread.
    pub fn finish(mut self) -> Result<(), DecodeError> {
        match self.values.next() {
            Some(_) => Err(DecodeError::Inconsistent(format!(
                "{} has unexpected trailing fields",
                self.name
            ))),
            None => Ok(()),
        }
    }
}
