//! # Decoder
//!
//! Strict inverse of the encoder. The input must be exactly the encoding of
//! one value: no trailing bytes, no missing bytes, offsets that start at the
//! end of the fixed region and never decrease, element counts within their
//! declared limits, and canonical booleans and bitfields.

use crate::domain::{Field, Schema, Value, BYTES_PER_OFFSET};
use crate::error::DecodeError;

/// How many elements a sequence must hold.
#[derive(Clone, Copy)]
enum Count {
    Exact(usize),
    AtMost(usize),
}

/// Decode `bytes` under `schema`.
pub fn decode(bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
    match schema {
        Schema::Uint(width) => decode_uint(bytes, *width).map(Value::Uint),
        Schema::Bool => {
            expect_len(bytes, 1)?;
            match bytes[0] {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                other => Err(DecodeError::InvalidBool(other)),
            }
        }
        Schema::ByteVector(n) => {
            expect_len(bytes, *n)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Schema::ByteList(max) => {
            check_limit(bytes.len(), *max)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Schema::Bitvector(n) => decode_bitvector(bytes, *n).map(Value::Bits),
        Schema::Bitlist(max) => decode_bitlist(bytes, *max).map(Value::Bits),
        Schema::Vector(element, n) => {
            decode_sequence(bytes, element, Count::Exact(*n)).map(Value::Sequence)
        }
        Schema::List(element, max) => {
            decode_sequence(bytes, element, Count::AtMost(*max)).map(Value::Sequence)
        }
        Schema::Container(fields) => decode_container(bytes, fields).map(Value::Container),
    }
}

fn decode_uint(bytes: &[u8], width: usize) -> Result<u64, DecodeError> {
    if !matches!(width, 1 | 2 | 4 | 8) {
        return Err(DecodeError::UnsupportedWidth(width));
    }
    expect_len(bytes, width)?;
    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(bytes);
    Ok(u64::from_le_bytes(buf))
}

fn decode_bitvector(bytes: &[u8], n: usize) -> Result<Vec<bool>, DecodeError> {
    expect_len(bytes, n.div_ceil(8))?;
    if n % 8 != 0 {
        if let Some(last) = bytes.last() {
            if last >> (n % 8) != 0 {
                return Err(DecodeError::InvalidBitPadding);
            }
        }
    }
    Ok(unpack_bits(bytes, n))
}

fn decode_bitlist(bytes: &[u8], max: usize) -> Result<Vec<bool>, DecodeError> {
    let last = match bytes.last() {
        Some(&last) if last != 0 => last,
        _ => return Err(DecodeError::MissingBitlistDelimiter),
    };
    let delimiter = 7 - last.leading_zeros() as usize;
    let len = (bytes.len() - 1) * 8 + delimiter;
    check_limit(len, max)?;
    Ok(unpack_bits(bytes, len))
}

fn unpack_bits(bytes: &[u8], len: usize) -> Vec<bool> {
    (0..len).map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1).collect()
}

fn decode_sequence(bytes: &[u8], element: &Schema, count: Count) -> Result<Vec<Value>, DecodeError> {
    match element.fixed_size() {
        Some(0) => Err(DecodeError::UnsupportedWidth(0)),
        Some(size) => {
            match count {
                Count::Exact(n) => expect_len(bytes, n * size)?,
                Count::AtMost(max) => {
                    if bytes.len() % size != 0 {
                        return Err(DecodeError::NotMultipleOfElementSize {
                            len: bytes.len(),
                            element_size: size,
                        });
                    }
                    check_limit(bytes.len() / size, max)?;
                }
            }
            bytes
                .chunks_exact(size)
                .map(|chunk| decode(chunk, element))
                .collect()
        }
        None => decode_variable_sequence(bytes, element, count),
    }
}

/// Sequence of variable-size elements: an offset table whose first entry
/// also fixes the element count.
fn decode_variable_sequence(
    bytes: &[u8],
    element: &Schema,
    count: Count,
) -> Result<Vec<Value>, DecodeError> {
    if bytes.is_empty() {
        return match count {
            Count::Exact(n) if n > 0 => Err(DecodeError::TooShort {
                len: 0,
                expected: n * BYTES_PER_OFFSET,
            }),
            _ => Ok(Vec::new()),
        };
    }

    let first = read_offset(bytes, 0)?;
    let len = first / BYTES_PER_OFFSET;
    if first == 0 || first % BYTES_PER_OFFSET != 0 {
        return Err(DecodeError::FirstOffsetMismatch {
            offset: first,
            expected: len.max(1) * BYTES_PER_OFFSET,
        });
    }
    match count {
        Count::Exact(n) if n != len => {
            return Err(DecodeError::FirstOffsetMismatch {
                offset: first,
                expected: n * BYTES_PER_OFFSET,
            })
        }
        Count::AtMost(max) => check_limit(len, max)?,
        _ => {}
    }
    if first > bytes.len() {
        return Err(DecodeError::OffsetOutOfBounds {
            offset: first,
            len: bytes.len(),
        });
    }

    let offsets = (0..len)
        .map(|i| read_offset(bytes, i * BYTES_PER_OFFSET))
        .collect::<Result<Vec<_>, _>>()?;
    slice_payloads(bytes, &offsets)?
        .into_iter()
        .map(|payload| decode(payload, element))
        .collect()
}

fn decode_container(bytes: &[u8], fields: &[Field]) -> Result<Vec<Value>, DecodeError> {
    let fixed_len: usize = fields.iter().map(|f| f.schema.fixed_region_size()).sum();
    if bytes.len() < fixed_len {
        return Err(DecodeError::TooShort {
            len: bytes.len(),
            expected: fixed_len,
        });
    }

    // Fixed region: inline values decode immediately, variable fields
    // leave an offset behind.
    let mut values: Vec<Option<Value>> = Vec::with_capacity(fields.len());
    let mut offsets = Vec::new();
    let mut cursor = 0;
    for field in fields {
        match field.schema.fixed_size() {
            Some(size) => {
                values.push(Some(decode(&bytes[cursor..cursor + size], &field.schema)?));
                cursor += size;
            }
            None => {
                offsets.push(read_offset(bytes, cursor)?);
                values.push(None);
                cursor += BYTES_PER_OFFSET;
            }
        }
    }

    match offsets.first() {
        None => expect_len(bytes, fixed_len)?,
        Some(&first) if first != fixed_len => {
            return Err(DecodeError::FirstOffsetMismatch {
                offset: first,
                expected: fixed_len,
            })
        }
        Some(_) => {}
    }

    let mut payloads = slice_payloads(bytes, &offsets)?.into_iter();
    let variable_fields = fields.iter().filter(|f| f.schema.is_variable_size());
    let mut variable_values = Vec::with_capacity(offsets.len());
    for field in variable_fields {
        let payload = payloads.next().ok_or(DecodeError::TypeMismatch {
            expected: "container",
        })?;
        variable_values.push(decode(payload, &field.schema)?);
    }

    let mut variable_values = variable_values.into_iter();
    values
        .into_iter()
        .map(|slot| slot.or_else(|| variable_values.next()))
        .collect::<Option<Vec<_>>>()
        .ok_or(DecodeError::TypeMismatch {
            expected: "container",
        })
}

/// Split the variable region into payloads. Payload `i` spans
/// `offsets[i]..offsets[i + 1]`; the last one runs to the end of the input.
fn slice_payloads<'a>(bytes: &'a [u8], offsets: &[usize]) -> Result<Vec<&'a [u8]>, DecodeError> {
    let mut payloads = Vec::with_capacity(offsets.len());
    for (i, &start) in offsets.iter().enumerate() {
        let end = offsets.get(i + 1).copied().unwrap_or(bytes.len());
        if start > bytes.len() {
            return Err(DecodeError::OffsetOutOfBounds {
                offset: start,
                len: bytes.len(),
            });
        }
        if end > bytes.len() {
            return Err(DecodeError::OffsetOutOfBounds {
                offset: end,
                len: bytes.len(),
            });
        }
        if end < start {
            return Err(DecodeError::OffsetsDecreasing {
                previous: start,
                offset: end,
            });
        }
        payloads.push(&bytes[start..end]);
    }
    Ok(payloads)
}

fn read_offset(bytes: &[u8], at: usize) -> Result<usize, DecodeError> {
    let raw = bytes
        .get(at..at + BYTES_PER_OFFSET)
        .ok_or(DecodeError::TooShort {
            len: bytes.len(),
            expected: at + BYTES_PER_OFFSET,
        })?;
    let mut buf = [0u8; BYTES_PER_OFFSET];
    buf.copy_from_slice(raw);
    Ok(u32::from_le_bytes(buf) as usize)
}

fn expect_len(bytes: &[u8], expected: usize) -> Result<(), DecodeError> {
    if bytes.len() != expected {
        return Err(DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected,
        });
    }
    Ok(())
}

fn check_limit(len: usize, max: usize) -> Result<(), DecodeError> {
    if len > max {
        return Err(DecodeError::ListTooLong { len, max });
    }
    Ok(())
}
