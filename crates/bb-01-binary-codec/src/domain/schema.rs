//! Explicit schema description
//!
//! A `Schema` is a tree of type descriptors. All layout decisions (fixed
//! sizes, which fields need offsets) are answered from the schema alone, so
//! the encoder never has to follow pointers through the value being encoded
//! to find out where something goes.

/// Size in bytes of one offset in a fixed region.
pub const BYTES_PER_OFFSET: usize = 4;

/// Type descriptor for a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// Unsigned integer of the given byte width (1, 2, 4 or 8).
    Uint(usize),
    /// Boolean, one byte.
    Bool,
    /// Exactly `n` raw bytes.
    ByteVector(usize),
    /// Up to `max` raw bytes.
    ByteList(usize),
    /// Exactly `n` bits.
    Bitvector(usize),
    /// Up to `max` bits, terminated by a delimiter bit.
    Bitlist(usize),
    /// Exactly `n` elements.
    Vector(Box<Schema>, usize),
    /// Up to `max` elements.
    List(Box<Schema>, usize),
    /// Ordered, named fields.
    Container(Vec<Field>),
}

/// A named container field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
}

impl Schema {
    pub fn uint8() -> Self {
        Schema::Uint(1)
    }

    pub fn uint64() -> Self {
        Schema::Uint(8)
    }

    pub fn boolean() -> Self {
        Schema::Bool
    }

    /// 32-byte root / hash.
    pub fn bytes32() -> Self {
        Schema::ByteVector(32)
    }

    pub fn byte_vector(n: usize) -> Self {
        Schema::ByteVector(n)
    }

    pub fn byte_list(max: usize) -> Self {
        Schema::ByteList(max)
    }

    pub fn bitvector(n: usize) -> Self {
        Schema::Bitvector(n)
    }

    pub fn bitlist(max: usize) -> Self {
        Schema::Bitlist(max)
    }

    pub fn vector(element: Schema, n: usize) -> Self {
        Schema::Vector(Box::new(element), n)
    }

    pub fn list(element: Schema, max: usize) -> Self {
        Schema::List(Box::new(element), max)
    }

    pub fn container(fields: Vec<(&'static str, Schema)>) -> Self {
        Schema::Container(
            fields
                .into_iter()
                .map(|(name, schema)| Field { name, schema })
                .collect(),
        )
    }

    /// Encoded size if every value of this schema has the same size.
    ///
    /// Returns `None` for variable-size schemas.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Schema::Uint(width) => Some(*width),
            Schema::Bool => Some(1),
            Schema::ByteVector(n) => Some(*n),
            Schema::Bitvector(n) => Some(n.div_ceil(8)),
            Schema::Vector(element, n) => element.fixed_size().map(|size| size * n),
            Schema::Container(fields) => fields
                .iter()
                .map(|field| field.schema.fixed_size())
                .sum::<Option<usize>>(),
            Schema::ByteList(_) | Schema::Bitlist(_) | Schema::List(_, _) => None,
        }
    }

    pub fn is_variable_size(&self) -> bool {
        self.fixed_size().is_none()
    }

    /// Size this schema occupies in its parent's fixed region.
    pub fn fixed_region_size(&self) -> usize {
        self.fixed_size().unwrap_or(BYTES_PER_OFFSET)
    }

    /// Basic types are packed into chunks when merkleized.
    pub fn is_basic(&self) -> bool {
        matches!(self, Schema::Uint(_) | Schema::Bool)
    }

    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Uint(_) => "uint",
            Schema::Bool => "bool",
            Schema::ByteVector(_) => "byte vector",
            Schema::ByteList(_) => "byte list",
            Schema::Bitvector(_) => "bitvector",
            Schema::Bitlist(_) => "bitlist",
            Schema::Vector(_, _) => "vector",
            Schema::List(_, _) => "list",
            Schema::Container(_) => "container",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(Schema::uint64().fixed_size(), Some(8));
        assert_eq!(Schema::boolean().fixed_size(), Some(1));
        assert_eq!(Schema::bitvector(4).fixed_size(), Some(1));
        assert_eq!(Schema::bitvector(9).fixed_size(), Some(2));
        assert_eq!(Schema::vector(Schema::bytes32(), 64).fixed_size(), Some(2048));
        assert_eq!(Schema::list(Schema::uint64(), 8).fixed_size(), None);
    }

    #[test]
    fn test_container_with_variable_field_is_variable() {
        let schema = Schema::container(vec![
            ("a", Schema::uint64()),
            ("b", Schema::byte_list(10)),
        ]);
        assert!(schema.is_variable_size());
        assert_eq!(schema.fixed_region_size(), BYTES_PER_OFFSET);
    }

    #[test]
    fn test_fixed_container_size_is_sum_of_fields() {
        let schema = Schema::container(vec![
            ("epoch", Schema::uint64()),
            ("root", Schema::bytes32()),
        ]);
        assert_eq!(schema.fixed_size(), Some(40));
    }
}
