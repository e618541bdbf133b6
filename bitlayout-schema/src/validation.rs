//! Construction-time schema validation.
//!
//! Every rule here runs once at schema build time; the codec itself never
//! re-checks them. A failed check aborts construction entirely.

use std::collections::HashSet;

use crate::error::{Result, SchemaError};
use crate::types::{Dialect, FieldDescriptor, FieldKind};

/// Validates a field tree for the given dialect.
///
/// # Errors
/// Returns `SchemaError::Validation` describing the first violation found.
pub(crate) fn validate(dialect: Dialect, fields: &[FieldDescriptor]) -> Result<()> {
    validate_scope(dialect, fields, 0, false)?;
    Ok(())
}

/// Validates one sibling scope, returning the bit offset after it.
///
/// `inside_repeated` is true while inside a group with repeat > 1, where
/// dialects restrict which element kinds may appear.
fn validate_scope(
    dialect: Dialect,
    fields: &[FieldDescriptor],
    start_bit: u64,
    inside_repeated: bool,
) -> Result<u64> {
    let mut seen_ids = HashSet::new();
    let mut offset = start_bit;

    for field in fields {
        if !seen_ids.insert(field.id()) {
            return Err(SchemaError::validation(format!(
                "duplicate field identifier '{}'",
                field.id()
            )));
        }

        if inside_repeated && !dialect.allows_repeated(field.kind()) {
            return Err(SchemaError::validation(format!(
                "field '{}' of kind {} may not appear inside a repeated group in this dialect",
                field.id(),
                field.kind().name()
            )));
        }

        match field.kind() {
            FieldKind::UInt { bits, min, max } => {
                check_width(field.id(), *bits, 1)?;
                if min > max {
                    return Err(range_order_error(field.id()));
                }
                if *bits < 32 && u64::from(*max) > (1u64 << bits) - 1 {
                    return Err(SchemaError::validation(format!(
                        "maximum {} for field '{}' does not fit in {} bits",
                        max,
                        field.id(),
                        bits
                    )));
                }
            }
            FieldKind::Int { bits, min, max } => {
                check_width(field.id(), *bits, 2)?;
                if min > max {
                    return Err(range_order_error(field.id()));
                }
                let lo = -(1i64 << (bits - 1));
                let hi = (1i64 << (bits - 1)) - 1;
                if i64::from(*min) < lo || i64::from(*max) > hi {
                    return Err(SchemaError::validation(format!(
                        "range [{}, {}] for field '{}' does not fit in {} bits",
                        min,
                        max,
                        field.id(),
                        bits
                    )));
                }
            }
            FieldKind::Bool => {
                // Warn-only in the EEPROM dialect: the original tolerates a
                // misaligned 8-bit boolean but its generated accessors are
                // slower and harder to audit.
                if dialect == Dialect::EepromV1 && offset % 8 != 0 {
                    tracing::warn!(
                        field = field.id(),
                        bit_offset = offset,
                        "boolean field is not byte-aligned in the EEPROM dialect"
                    );
                }
            }
            FieldKind::Enum { bits, values } => {
                check_width(field.id(), *bits, 1)?;
                validate_enum_table(field.id(), *bits, values)?;
            }
            FieldKind::ByteArray { bytes } => {
                if *bytes == 0 {
                    return Err(SchemaError::validation(format!(
                        "byte array '{}' must have at least one byte",
                        field.id()
                    )));
                }
            }
            FieldKind::Reserved { bits } => {
                if *bits == 0 {
                    return Err(SchemaError::validation(format!(
                        "reserved field '{}' must occupy at least one bit",
                        field.id()
                    )));
                }
            }
            FieldKind::Group { fields, repeat } => {
                if *repeat == 0 {
                    return Err(SchemaError::validation(format!(
                        "group '{}' must have a repeat count of at least 1",
                        field.id()
                    )));
                }
                if fields.is_empty() {
                    return Err(SchemaError::validation(format!(
                        "group '{}' must contain at least one field",
                        field.id()
                    )));
                }
                if *repeat > 1 && fields.iter().any(|f| matches!(f.kind(), FieldKind::Group { .. }))
                {
                    return Err(SchemaError::validation(format!(
                        "repeated group '{}' may not contain a nested group",
                        field.id()
                    )));
                }
                // Inner fields are validated at the first repetition's
                // offsets; later repetitions replay the same list.
                validate_scope(dialect, fields, offset, inside_repeated || *repeat > 1)?;
            }
        }

        offset += field.bit_len(dialect);
    }

    Ok(offset)
}

fn check_width(id: &str, bits: u32, min: u32) -> Result<()> {
    if bits < min || bits > bitlayout_core::MAX_SCALAR_BITS {
        return Err(SchemaError::validation(format!(
            "field '{id}' has width {bits} bits, supported range is {min}..=32"
        )));
    }
    Ok(())
}

fn range_order_error(id: &str) -> SchemaError {
    SchemaError::validation(format!("field '{id}' declares min greater than max"))
}

fn validate_enum_table(id: &str, bits: u32, values: &[(u32, String)]) -> Result<()> {
    if values.is_empty() {
        return Err(SchemaError::validation(format!(
            "enum field '{id}' has an empty value table"
        )));
    }

    let mut seen_values = HashSet::new();
    let mut seen_symbols = HashSet::new();
    for (value, symbol) in values {
        if !seen_values.insert(value) {
            return Err(SchemaError::validation(format!(
                "enum field '{id}' defines value {value} twice"
            )));
        }
        if !seen_symbols.insert(symbol.as_str()) {
            return Err(SchemaError::validation(format!(
                "enum field '{id}' defines symbol '{symbol}' twice"
            )));
        }
        if bits < 32 && u64::from(*value) > (1u64 << bits) - 1 {
            return Err(SchemaError::validation(format!(
                "enum value {value} for field '{id}' does not fit in {bits} bits"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    fn colors() -> Vec<(u32, String)> {
        vec![(0, "RED".to_string()), (1, "BLUE".to_string())]
    }

    #[test]
    fn test_valid_schema_builds() {
        let schema = Schema::new(
            Dialect::EepromV1,
            vec![
                FieldDescriptor::uint("device_id", 12, 0, 4095),
                FieldDescriptor::enumeration("color", 2, colors()),
                FieldDescriptor::reserved("pad", 2),
                FieldDescriptor::byte_array("key", 32),
            ],
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let err = Schema::new(
            Dialect::EepromV1,
            vec![
                FieldDescriptor::uint("x", 8, 0, 255),
                FieldDescriptor::int("x", 8, -128, 127),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate field identifier 'x'"));
    }

    #[test]
    fn test_same_identifier_in_sibling_scopes_allowed() {
        let schema = Schema::new(
            Dialect::EepromV1,
            vec![
                FieldDescriptor::uint("value", 8, 0, 255),
                FieldDescriptor::group("g", 1, vec![FieldDescriptor::uint("value", 8, 0, 255)]),
            ],
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn test_duplicate_enum_symbol_rejected() {
        let table = vec![(0, "ON".to_string()), (1, "ON".to_string())];
        let err = Schema::new(
            Dialect::EepromV1,
            vec![FieldDescriptor::enumeration("mode", 2, table)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("symbol 'ON' twice"));
    }

    #[test]
    fn test_duplicate_enum_value_rejected() {
        let table = vec![(1, "ON".to_string()), (1, "OFF".to_string())];
        assert!(
            Schema::new(
                Dialect::EepromV1,
                vec![FieldDescriptor::enumeration("mode", 2, table)],
            )
            .is_err()
        );
    }

    #[test]
    fn test_enum_value_must_fit_width() {
        let table = vec![(0, "A".to_string()), (4, "B".to_string())];
        assert!(
            Schema::new(
                Dialect::EepromV1,
                vec![FieldDescriptor::enumeration("mode", 2, table)],
            )
            .is_err()
        );
    }

    #[test]
    fn test_uint_max_must_fit_width() {
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::uint("x", 4, 0, 16)]).is_err());
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::uint("x", 4, 0, 15)]).is_ok());
    }

    #[test]
    fn test_int_range_must_fit_width() {
        assert!(
            Schema::new(Dialect::EepromV1, vec![FieldDescriptor::int("x", 4, -9, 7)]).is_err()
        );
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::int("x", 4, -8, 7)]).is_ok());
    }

    #[test]
    fn test_min_above_max_rejected() {
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::uint("x", 8, 10, 5)]).is_err());
    }

    #[test]
    fn test_width_limits() {
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::uint("x", 0, 0, 0)]).is_err());
        assert!(
            Schema::new(Dialect::EepromV1, vec![FieldDescriptor::uint("x", 33, 0, 0)]).is_err()
        );
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::int("x", 1, 0, 0)]).is_err());
    }

    #[test]
    fn test_misaligned_eeprom_bool_is_warn_only() {
        // A boolean off a byte boundary in the EEPROM dialect warns but
        // still builds; the rule is recoverable, not fatal.
        let schema = Schema::new(
            Dialect::EepromV1,
            vec![
                FieldDescriptor::reserved("pad", 3),
                FieldDescriptor::bool("flag"),
            ],
        )
        .unwrap();
        assert_eq!(schema.bit_len(), 11);
    }

    #[test]
    fn test_repeated_group_forbids_reserved_everywhere() {
        for dialect in [Dialect::EepromV1, Dialect::PacketV1] {
            let err = Schema::new(
                dialect,
                vec![FieldDescriptor::group(
                    "g",
                    4,
                    vec![FieldDescriptor::reserved("pad", 3)],
                )],
            )
            .unwrap_err();
            assert!(err.to_string().contains("repeated group"), "{dialect:?}");
        }
    }

    #[test]
    fn test_repeated_enum_forbidden_only_in_eeprom_dialect() {
        let make = |dialect| {
            Schema::new(
                dialect,
                vec![FieldDescriptor::group(
                    "g",
                    4,
                    vec![FieldDescriptor::enumeration("color", 2, colors())],
                )],
            )
        };
        assert!(make(Dialect::EepromV1).is_err());
        assert!(make(Dialect::PacketV1).is_ok());
    }

    #[test]
    fn test_repeated_byte_array_forbidden_only_in_eeprom_dialect() {
        let make = |dialect| {
            Schema::new(
                dialect,
                vec![FieldDescriptor::group(
                    "g",
                    2,
                    vec![FieldDescriptor::byte_array("blob", 4)],
                )],
            )
        };
        assert!(make(Dialect::EepromV1).is_err());
        assert!(make(Dialect::PacketV1).is_ok());
    }

    #[test]
    fn test_nested_group_inside_repeated_group_rejected() {
        let inner = FieldDescriptor::group("inner", 1, vec![FieldDescriptor::bool("b")]);
        assert!(Schema::new(Dialect::PacketV1, vec![FieldDescriptor::group("g", 2, vec![inner])])
            .is_err());
    }

    #[test]
    fn test_singular_group_may_nest() {
        let inner = FieldDescriptor::group("inner", 1, vec![FieldDescriptor::bool("b")]);
        assert!(
            Schema::new(Dialect::PacketV1, vec![FieldDescriptor::group("g", 1, vec![inner])])
                .is_ok()
        );
    }

    #[test]
    fn test_empty_group_rejected() {
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::group("g", 1, vec![])]).is_err());
        assert!(
            Schema::new(
                Dialect::EepromV1,
                vec![FieldDescriptor::group("g", 0, vec![FieldDescriptor::bool("b")])]
            )
            .is_err()
        );
    }

    #[test]
    fn test_zero_length_leafs_rejected() {
        assert!(
            Schema::new(Dialect::EepromV1, vec![FieldDescriptor::byte_array("a", 0)]).is_err()
        );
        assert!(Schema::new(Dialect::EepromV1, vec![FieldDescriptor::reserved("r", 0)]).is_err());
    }
}
