//! Schema type definitions.
//!
//! A schema is an immutable tree of [`FieldDescriptor`]s built once from a
//! declarative definition and shared read-only afterwards; nothing here is
//! mutated during encode or decode.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::registry::EnumRegistry;
use crate::validation;

/// Layout convention variant.
///
/// The EEPROM image format and the radio packet format share the codec but
/// differ in a few layout rules, so the dialect is explicit configuration
/// rather than a hard-coded constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// EEPROM image layout: booleans are 8 bits wide; repeated groups may
    /// not contain Reserved, ByteArray or Enum fields.
    EepromV1,
    /// Packet payload layout: booleans are 1 bit wide; repeated groups may
    /// not contain Reserved fields.
    PacketV1,
}

impl Dialect {
    /// Width of a boolean field in this dialect, in bits.
    #[must_use]
    pub const fn bool_bits(self) -> u32 {
        match self {
            Self::EepromV1 => 8,
            Self::PacketV1 => 1,
        }
    }

    /// Returns true if the given field kind may appear inside a repeated
    /// group in this dialect.
    #[must_use]
    pub fn allows_repeated(self, kind: &FieldKind) -> bool {
        match self {
            Self::EepromV1 => !matches!(
                kind,
                FieldKind::Reserved { .. } | FieldKind::ByteArray { .. } | FieldKind::Enum { .. }
            ),
            Self::PacketV1 => !matches!(kind, FieldKind::Reserved { .. }),
        }
    }
}

/// A single field in a schema: an identifier plus its layout kind.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    id: String,
    kind: FieldKind,
}

/// Field layout variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned integer of `bits` width with declared value bounds.
    UInt {
        /// Field width in bits (1..=32).
        bits: u32,
        /// Minimum valid value.
        min: u32,
        /// Maximum valid value.
        max: u32,
    },
    /// Signed two's-complement integer of `bits` width with declared bounds.
    Int {
        /// Field width in bits (2..=32).
        bits: u32,
        /// Minimum valid value.
        min: i32,
        /// Maximum valid value.
        max: i32,
    },
    /// Boolean flag; width is dialect-specific (see [`Dialect::bool_bits`]).
    Bool,
    /// Enumerated value with an ordered value-to-symbol table.
    Enum {
        /// Field width in bits (1..=32).
        bits: u32,
        /// Ordered mapping from integer value to symbolic name.
        values: Vec<(u32, String)>,
    },
    /// Contiguous byte array; must start on a byte boundary.
    ByteArray {
        /// Array length in bytes.
        bytes: usize,
    },
    /// Reserved padding; occupies space, carries no value.
    Reserved {
        /// Padding width in bits.
        bits: u32,
    },
    /// Possibly-repeated sequence of sub-fields.
    Group {
        /// Inner field list, replayed contiguously per repetition.
        fields: Vec<FieldDescriptor>,
        /// Repetition count (1 for a non-array group).
        repeat: usize,
    },
}

impl FieldKind {
    /// Short name of the kind, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UInt { .. } => "UInt",
            Self::Int { .. } => "Int",
            Self::Bool => "Bool",
            Self::Enum { .. } => "Enum",
            Self::ByteArray { .. } => "ByteArray",
            Self::Reserved { .. } => "Reserved",
            Self::Group { .. } => "Group",
        }
    }
}

impl FieldDescriptor {
    /// Creates an unsigned integer field.
    #[must_use]
    pub fn uint(id: impl Into<String>, bits: u32, min: u32, max: u32) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::UInt { bits, min, max },
        }
    }

    /// Creates a signed integer field.
    #[must_use]
    pub fn int(id: impl Into<String>, bits: u32, min: i32, max: i32) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Int { bits, min, max },
        }
    }

    /// Creates a boolean field.
    #[must_use]
    pub fn bool(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Bool,
        }
    }

    /// Creates an enum field from an ordered value table.
    #[must_use]
    pub fn enumeration(id: impl Into<String>, bits: u32, values: Vec<(u32, String)>) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Enum { bits, values },
        }
    }

    /// Creates a byte-array field.
    #[must_use]
    pub fn byte_array(id: impl Into<String>, bytes: usize) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::ByteArray { bytes },
        }
    }

    /// Creates a reserved padding field.
    #[must_use]
    pub fn reserved(id: impl Into<String>, bits: u32) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Reserved { bits },
        }
    }

    /// Creates a (possibly repeated) group of sub-fields.
    #[must_use]
    pub fn group(id: impl Into<String>, repeat: usize, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Group { fields, repeat },
        }
    }

    /// Field identifier, unique among its siblings.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Field layout kind.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Total bits this field occupies in the given dialect.
    ///
    /// A group contributes `repeat` times the one-time traversal of its
    /// inner field list.
    #[must_use]
    pub fn bit_len(&self, dialect: Dialect) -> u64 {
        match &self.kind {
            FieldKind::UInt { bits, .. }
            | FieldKind::Int { bits, .. }
            | FieldKind::Enum { bits, .. }
            | FieldKind::Reserved { bits } => u64::from(*bits),
            FieldKind::Bool => u64::from(dialect.bool_bits()),
            FieldKind::ByteArray { bytes } => 8 * *bytes as u64,
            FieldKind::Group { fields, repeat } => {
                let inner: u64 = fields.iter().map(|f| f.bit_len(dialect)).sum();
                inner * *repeat as u64
            }
        }
    }
}

/// A decoded field value, mirroring [`FieldKind`]'s cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// Unsigned integer value.
    UInt(u32),
    /// Signed integer value.
    Int(i32),
    /// Boolean value.
    Bool(bool),
    /// Enum value with its resolved symbol.
    Enum {
        /// Raw integer value.
        value: u32,
        /// Symbolic name from the value table.
        symbol: String,
    },
    /// Byte-array contents.
    Bytes(Vec<u8>),
    /// One value set per group repetition.
    Groups(Vec<BTreeMap<String, DecodedValue>>),
}

impl DecodedValue {
    /// Returns the unsigned value, if this is a `UInt`.
    #[must_use]
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the signed value, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a `Bytes`.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the per-repetition value sets, if this is a `Groups`.
    #[must_use]
    pub fn as_groups(&self) -> Option<&[BTreeMap<String, DecodedValue>]> {
        match self {
            Self::Groups(v) => Some(v),
            _ => None,
        }
    }
}

/// A validated, immutable field layout for one buffer format.
#[derive(Debug, Clone)]
pub struct Schema {
    dialect: Dialect,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Builds a schema, running all construction-time checks.
    ///
    /// Validation fails fast: nothing partially built is returned.
    ///
    /// # Errors
    /// Returns [`crate::SchemaError::Validation`] for duplicate identifiers
    /// or enum symbols, width/range violations, or element kinds that the
    /// dialect forbids inside repeated groups.
    pub fn new(dialect: Dialect, fields: Vec<FieldDescriptor>) -> Result<Self> {
        validation::validate(dialect, &fields)?;
        Ok(Self { dialect, fields })
    }

    /// Builds a schema and cross-checks every enum field against the given
    /// registry (see [`EnumRegistry::check`]).
    ///
    /// # Errors
    /// Validation errors as in [`Schema::new`], plus
    /// [`crate::SchemaError::EnumConflict`] if a table contradicts an
    /// earlier registration.
    pub fn with_registry(
        dialect: Dialect,
        fields: Vec<FieldDescriptor>,
        registry: &EnumRegistry,
    ) -> Result<Self> {
        let schema = Self::new(dialect, fields)?;
        register_enums(&schema.fields, registry)?;
        Ok(schema)
    }

    /// Layout dialect of this schema.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Top-level field list in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Total bits one full walk of the schema consumes.
    #[must_use]
    pub fn bit_len(&self) -> u64 {
        self.fields.iter().map(|f| f.bit_len(self.dialect)).sum()
    }

    /// Smallest whole-byte buffer size that holds the schema, in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bit_len().div_ceil(8) as usize
    }
}

fn register_enums(fields: &[FieldDescriptor], registry: &EnumRegistry) -> Result<()> {
    for field in fields {
        match field.kind() {
            FieldKind::Enum { values, .. } => registry.check(field.id(), values)?,
            FieldKind::Group { fields, .. } => register_enums(fields, registry)?,
            _ => {}
        }
    }
    Ok(())
}
