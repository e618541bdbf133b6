//! Layout walker: a single left-to-right traversal over a schema's field
//! list that assigns each field a monotonically increasing bit offset and
//! applies the codec there.
//!
//! Decode, encode and offset enumeration all advance the cursor by
//! [`FieldDescriptor::bit_len`], so the three directions assign identical
//! offsets by construction. Groups with `repeat > 1` replay their inner
//! field list once per repetition at successive offsets.

use std::collections::BTreeMap;

use bitlayout_core as codec;

use crate::error::{Result, SchemaError};
use crate::types::{DecodedValue, Dialect, FieldDescriptor, FieldKind, Schema};

/// Decoded values of one sibling scope, keyed by field identifier.
pub type FieldMap = BTreeMap<String, DecodedValue>;

/// Resolved position of one leaf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOffset {
    /// Dotted path to the field; array repetitions are indexed, e.g.
    /// `channels[2].brightness`.
    pub path: String,
    /// Offset of the field's first bit.
    pub start_bit: u64,
    /// Field width in bits.
    pub len_bits: u64,
}

/// Decodes a buffer into a map from field identifier to value.
///
/// `base_bit` is 0 for whole-image layouts, or the header length in bits for
/// packet payloads that follow a variable-length header.
///
/// # Errors
/// Returns a codec error if the buffer is too short or a byte array is
/// misaligned, and [`SchemaError::UnknownEnumValue`] if an enum field holds
/// a raw value absent from its table.
pub fn decode(schema: &Schema, buf: &[u8], base_bit: u64) -> Result<FieldMap> {
    let mut values = FieldMap::new();
    decode_fields(schema.dialect(), schema.fields(), buf, base_bit, &mut values)?;
    Ok(values)
}

/// Encodes a map of field values into a buffer, returning the total bits
/// consumed (the final cursor position minus `base_bit`), which callers use
/// to size buffers and compute any framing padding.
///
/// Application is field by field and non-transactional: when a field fails,
/// writes made for earlier fields remain in the buffer.
///
/// # Errors
/// Returns [`SchemaError::MissingValue`] / [`SchemaError::TypeMismatch`] for
/// absent or mistyped entries, [`SchemaError::UnknownEnumValue`] and
/// [`SchemaError::LengthMismatch`] for bad enum/array/group values, and a
/// codec error for range violations, misalignment or a short buffer.
pub fn encode(schema: &Schema, values: &FieldMap, buf: &mut [u8], base_bit: u64) -> Result<u64> {
    let end = encode_fields(schema.dialect(), schema.fields(), values, buf, base_bit)?;
    Ok(end - base_bit)
}

/// Enumerates the resolved position of every leaf field, in layout order.
///
/// Reserved fields appear with their identifier; group repetitions expand to
/// indexed paths.
#[must_use]
pub fn offsets(schema: &Schema, base_bit: u64) -> Vec<FieldOffset> {
    let mut out = Vec::new();
    collect_offsets(schema.dialect(), schema.fields(), "", base_bit, &mut out);
    out
}

fn decode_fields(
    dialect: Dialect,
    fields: &[FieldDescriptor],
    buf: &[u8],
    mut offset: u64,
    out: &mut FieldMap,
) -> Result<u64> {
    for field in fields {
        let start = offset as usize;
        match field.kind() {
            FieldKind::UInt { bits, .. } => {
                let v = codec::decode_uint(buf, start, *bits)?;
                out.insert(field.id().to_string(), DecodedValue::UInt(v));
            }
            FieldKind::Int { bits, .. } => {
                let v = codec::decode_int(buf, start, *bits)?;
                out.insert(field.id().to_string(), DecodedValue::Int(v));
            }
            FieldKind::Bool => {
                let v = codec::decode_bool(buf, start, dialect.bool_bits())?;
                out.insert(field.id().to_string(), DecodedValue::Bool(v));
            }
            FieldKind::Enum { bits, values } => {
                let raw = codec::decode_uint(buf, start, *bits)?;
                let symbol = values
                    .iter()
                    .find(|(v, _)| *v == raw)
                    .map(|(_, s)| s.clone())
                    .ok_or_else(|| SchemaError::UnknownEnumValue {
                        field: field.id().to_string(),
                        value: raw,
                    })?;
                out.insert(
                    field.id().to_string(),
                    DecodedValue::Enum { value: raw, symbol },
                );
            }
            FieldKind::ByteArray { bytes } => {
                let data = codec::decode_bytes(buf, start, *bytes)?;
                out.insert(field.id().to_string(), DecodedValue::Bytes(data));
            }
            FieldKind::Reserved { .. } => {}
            FieldKind::Group { fields, repeat } => {
                let mut sets = Vec::with_capacity(*repeat);
                let mut inner = offset;
                for _ in 0..*repeat {
                    let mut set = FieldMap::new();
                    inner = decode_fields(dialect, fields, buf, inner, &mut set)?;
                    sets.push(set);
                }
                out.insert(field.id().to_string(), DecodedValue::Groups(sets));
            }
        }
        offset += field.bit_len(dialect);
    }
    Ok(offset)
}

fn encode_fields(
    dialect: Dialect,
    fields: &[FieldDescriptor],
    values: &FieldMap,
    buf: &mut [u8],
    mut offset: u64,
) -> Result<u64> {
    for field in fields {
        let start = offset as usize;

        // Reserved fields advance the cursor without touching the buffer.
        if !matches!(field.kind(), FieldKind::Reserved { .. }) {
            let value = values
                .get(field.id())
                .ok_or_else(|| SchemaError::MissingValue {
                    field: field.id().to_string(),
                })?;

            match (field.kind(), value) {
                (FieldKind::UInt { bits, min, max }, DecodedValue::UInt(v)) => {
                    codec::check_uint_range(*v, *min, *max)?;
                    codec::encode_uint(*v, buf, start, *bits)?;
                }
                (FieldKind::Int { bits, min, max }, DecodedValue::Int(v)) => {
                    codec::check_int_range(*v, *min, *max)?;
                    codec::encode_int(*v, buf, start, *bits)?;
                }
                (FieldKind::Bool, DecodedValue::Bool(v)) => {
                    codec::encode_bool(*v, buf, start, dialect.bool_bits())?;
                }
                (FieldKind::Enum { bits, values: table }, DecodedValue::Enum { value, .. }) => {
                    if !table.iter().any(|(v, _)| v == value) {
                        return Err(SchemaError::UnknownEnumValue {
                            field: field.id().to_string(),
                            value: *value,
                        });
                    }
                    codec::encode_uint(*value, buf, start, *bits)?;
                }
                (FieldKind::ByteArray { bytes }, DecodedValue::Bytes(data)) => {
                    if data.len() != *bytes {
                        return Err(SchemaError::LengthMismatch {
                            field: field.id().to_string(),
                            expected: *bytes,
                            actual: data.len(),
                        });
                    }
                    codec::encode_bytes(data, buf, start)?;
                }
                (FieldKind::Group { fields, repeat }, DecodedValue::Groups(sets)) => {
                    if sets.len() != *repeat {
                        return Err(SchemaError::LengthMismatch {
                            field: field.id().to_string(),
                            expected: *repeat,
                            actual: sets.len(),
                        });
                    }
                    let mut inner = offset;
                    for set in sets {
                        inner = encode_fields(dialect, fields, set, buf, inner)?;
                    }
                }
                (kind, _) => {
                    return Err(SchemaError::TypeMismatch {
                        field: field.id().to_string(),
                        expected: kind.name(),
                    });
                }
            }
        }

        offset += field.bit_len(dialect);
    }
    Ok(offset)
}

fn collect_offsets(
    dialect: Dialect,
    fields: &[FieldDescriptor],
    prefix: &str,
    mut offset: u64,
    out: &mut Vec<FieldOffset>,
) -> u64 {
    for field in fields {
        match field.kind() {
            FieldKind::Group { fields: inner, repeat } => {
                let mut inner_offset = offset;
                for rep in 0..*repeat {
                    let rep_prefix = format!("{prefix}{}[{rep}].", field.id());
                    inner_offset =
                        collect_offsets(dialect, inner, &rep_prefix, inner_offset, out);
                }
            }
            _ => out.push(FieldOffset {
                path: format!("{prefix}{}", field.id()),
                start_bit: offset,
                len_bits: field.bit_len(dialect),
            }),
        }
        offset += field.bit_len(dialect);
    }
    offset
}
