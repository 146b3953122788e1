//! Domain Layer - schema description and value tree
//!
//! RULES:
//! - No I/O operations
//! - A schema fully determines the byte layout of every value it accepts

pub mod schema;
pub mod value;

pub use schema::{Field, Schema, BYTES_PER_OFFSET};
pub use value::Value;
