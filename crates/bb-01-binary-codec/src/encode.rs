//! # Encoder
//!
//! Encoding runs as two sequential passes over the schema:
//!
//! 1. **Size pass** (`encoded_len`): validates the value against the schema
//!    and computes the size of every fixed region and variable payload.
//! 2. **Layout pass** (`write`): writes each fixed region, filling offset
//!    slots from the sizes of the pass above, then appends the variable
//!    payloads in declared order.
//!
//! Offsets are relative to the start of the enclosing container or sequence.

use crate::domain::{Schema, Value, BYTES_PER_OFFSET};
use crate::error::EncodeError;

/// Encode `value` under `schema`.
///
/// Pure and deterministic: the same `(value, schema)` always yields the
/// same bytes.
pub fn encode(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let len = encoded_len(value, schema)?;
    if len > u32::MAX as usize {
        return Err(EncodeError::TooLarge(len));
    }

    let mut out = Vec::with_capacity(len);
    write(value, schema, &mut out)?;
    debug_assert_eq!(out.len(), len);
    Ok(out)
}

/// Size pass: number of bytes `value` occupies when encoded under `schema`.
///
/// Fails if the value does not fit the schema.
pub fn encoded_len(value: &Value, schema: &Schema) -> Result<usize, EncodeError> {
    match (value, schema) {
        (Value::Uint(v), Schema::Uint(width)) => {
            check_uint(*v, *width)?;
            Ok(*width)
        }
        (Value::Bool(_), Schema::Bool) => Ok(1),
        (Value::Bytes(bytes), Schema::ByteVector(n)) => {
            expect_len(*n, bytes.len())?;
            Ok(*n)
        }
        (Value::Bytes(bytes), Schema::ByteList(max)) => {
            check_limit(bytes.len(), *max)?;
            Ok(bytes.len())
        }
        (Value::Bits(bits), Schema::Bitvector(n)) => {
            expect_len(*n, bits.len())?;
            Ok(n.div_ceil(8))
        }
        (Value::Bits(bits), Schema::Bitlist(max)) => {
            check_limit(bits.len(), *max)?;
            Ok(bits.len() / 8 + 1)
        }
        (Value::Sequence(items), Schema::Vector(element, n)) => {
            expect_len(*n, items.len())?;
            sequence_len(items, element)
        }
        (Value::Sequence(items), Schema::List(element, max)) => {
            check_limit(items.len(), *max)?;
            sequence_len(items, element)
        }
        (Value::Container(values), Schema::Container(fields)) => {
            if values.len() != fields.len() {
                return Err(EncodeError::FieldCountMismatch {
                    expected: fields.len(),
                    actual: values.len(),
                });
            }
            let mut total = 0;
            for (value, field) in values.iter().zip(fields) {
                let len = encoded_len(value, &field.schema)?;
                total += if field.schema.is_variable_size() {
                    BYTES_PER_OFFSET + len
                } else {
                    len
                };
            }
            Ok(total)
        }
        _ => Err(EncodeError::TypeMismatch {
            expected: schema.kind(),
        }),
    }
}

fn sequence_len(items: &[Value], element: &Schema) -> Result<usize, EncodeError> {
    let variable = element.is_variable_size();
    let mut total = 0;
    for item in items {
        let len = encoded_len(item, element)?;
        total += if variable { BYTES_PER_OFFSET + len } else { len };
    }
    Ok(total)
}

/// Layout pass. Assumes nothing about prior validation; shape mismatches
/// still surface as errors.
pub(crate) fn write(value: &Value, schema: &Schema, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match (value, schema) {
        (Value::Uint(v), Schema::Uint(width)) => {
            check_uint(*v, *width)?;
            out.extend_from_slice(&v.to_le_bytes()[..*width]);
        }
        (Value::Bool(b), Schema::Bool) => out.push(u8::from(*b)),
        (Value::Bytes(bytes), Schema::ByteVector(_) | Schema::ByteList(_)) => {
            out.extend_from_slice(bytes)
        }
        (Value::Bits(bits), Schema::Bitvector(_)) => out.extend(pack_bits(bits, false)),
        (Value::Bits(bits), Schema::Bitlist(_)) => out.extend(pack_bits(bits, true)),
        (Value::Sequence(items), Schema::Vector(element, _) | Schema::List(element, _)) => {
            let parts: Vec<_> = items.iter().map(|item| (item, element.as_ref())).collect();
            write_parts(&parts, out)?;
        }
        (Value::Container(values), Schema::Container(fields)) => {
            let parts: Vec<_> = values
                .iter()
                .zip(fields.iter().map(|field| &field.schema))
                .collect();
            write_parts(&parts, out)?;
        }
        _ => {
            return Err(EncodeError::TypeMismatch {
                expected: schema.kind(),
            })
        }
    }
    Ok(())
}

/// Fixed region first (values inline, offsets for variable parts), then the
/// variable payloads in the same order.
fn write_parts(parts: &[(&Value, &Schema)], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let fixed_len: usize = parts
        .iter()
        .map(|(_, schema)| schema.fixed_region_size())
        .sum();

    let mut offset = fixed_len;
    let mut payloads = Vec::new();
    for &(value, schema) in parts {
        if schema.is_variable_size() {
            write_offset(offset, out)?;
            offset += encoded_len(value, schema)?;
            payloads.push((value, schema));
        } else {
            write(value, schema, out)?;
        }
    }

    for (value, schema) in payloads {
        write(value, schema, out)?;
    }
    Ok(())
}

fn write_offset(offset: usize, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let offset = u32::try_from(offset).map_err(|_| EncodeError::TooLarge(offset))?;
    out.extend_from_slice(&offset.to_le_bytes());
    Ok(())
}

/// Pack bits little-endian within each byte. With `delimiter`, a single
/// set bit is appended after the last data bit.
pub(crate) fn pack_bits(bits: &[bool], delimiter: bool) -> Vec<u8> {
    let len = if delimiter {
        bits.len() / 8 + 1
    } else {
        bits.len().div_ceil(8)
    };
    let mut bytes = vec![0u8; len];
    for (i, _) in bits.iter().enumerate().filter(|(_, bit)| **bit) {
        bytes[i / 8] |= 1 << (i % 8);
    }
    if delimiter {
        bytes[bits.len() / 8] |= 1 << (bits.len() % 8);
    }
    bytes
}

fn check_uint(value: u64, width: usize) -> Result<(), EncodeError> {
    match width {
        8 => Ok(()),
        1 | 2 | 4 if value >> (width * 8) == 0 => Ok(()),
        1 | 2 | 4 => Err(EncodeError::IntegerOverflow { value, width }),
        _ => Err(EncodeError::UnsupportedWidth(width)),
    }
}

fn expect_len(expected: usize, actual: usize) -> Result<(), EncodeError> {
    if expected != actual {
        return Err(EncodeError::LengthMismatch { expected, actual });
    }
    Ok(())
}

fn check_limit(len: usize, max: usize) -> Result<(), EncodeError> {
    if len > max {
        return Err(EncodeError::ListTooLong { len, max });
    }
    Ok(())
}
