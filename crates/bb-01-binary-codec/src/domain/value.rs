//! Dynamic value tree
//!
//! Values carry no layout information of their own; the same `Value` may be
//! valid under several schemas (e.g. `Uint(3)` under `Uint(1)` and `Uint(8)`).

/// A logical value to be interpreted against a [`Schema`](super::Schema).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Any unsigned integer; width comes from the schema.
    Uint(u64),
    Bool(bool),
    /// Raw bytes for `ByteVector` / `ByteList`.
    Bytes(Vec<u8>),
    /// Bits for `Bitvector` / `Bitlist`, index 0 first.
    Bits(Vec<bool>),
    /// Elements of a `Vector` / `List`.
    Sequence(Vec<Value>),
    /// Field values in declared order.
    Container(Vec<Value>),
}

impl Value {
    /// An empty `List` value.
    pub fn empty_list() -> Self {
        Value::Sequence(Vec::new())
    }
}
