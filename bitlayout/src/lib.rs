//! # BitLayout
//!
//! Schema-driven codec for bit-packed binary images such as device EEPROM
//! blocks and compact radio packets.
//!
//! BitLayout reads and writes fields at arbitrary bit offsets and widths,
//! MSB-first within each byte, driven by an immutable schema that assigns
//! every field its position through one shared layout walk.
//!
//! ## Quick Start
//!
//! ```
//! use bitlayout::prelude::*;
//!
//! let schema = Schema::new(
//!     Dialect::EepromV1,
//!     vec![
//!         FieldDescriptor::uint("device_id", 12, 0, 4095),
//!         FieldDescriptor::reserved("pad", 4),
//!         FieldDescriptor::bool("enabled"),
//!     ],
//! )?;
//!
//! let mut image = vec![0u8; schema.byte_len()];
//! let values = FieldMap::from([
//!     ("device_id".to_string(), DecodedValue::UInt(42)),
//!     ("enabled".to_string(), DecodedValue::Bool(true)),
//! ]);
//! encode(&schema, &values, &mut image, 0)?;
//!
//! let decoded = decode(&schema, &image, 0)?;
//! assert_eq!(decoded.get("device_id"), Some(&DecodedValue::UInt(42)));
//! # Ok::<(), bitlayout::schema::SchemaError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Bit span arithmetic, scalar and byte-block codecs, hex
//! - [`schema`] - Field descriptors, dialects, validation, the layout
//!   walker and the enum registry

pub mod prelude;

/// Bit-level codec primitives.
pub mod core {
    pub use bitlayout_core::*;
}

/// Schema model, validation and layout walking.
pub mod schema {
    pub use bitlayout_schema::*;
}

// Re-export commonly used items at the crate root
pub use bitlayout_core::{
    BitSpan, MAX_SCALAR_BITS, decode_bytes, encode_bytes, parse_hex, to_hex,
};

pub use bitlayout_schema::{
    DecodedValue, Dialect, EnumRegistry, FieldDescriptor, FieldKind, FieldMap, FieldOffset,
    Schema, SchemaError, decode, encode, offsets,
};
