//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use bitlayout::prelude::*;
//! ```

// Core codec
pub use bitlayout_core::{
    BitSpan, Error as CodecError, MAX_SCALAR_BITS, Result as CodecResult, decode_bool,
    decode_bytes, decode_int, decode_uint, encode_bool, encode_bytes, encode_int, encode_uint,
    parse_hex, to_hex,
};

// Schema model and walker
pub use bitlayout_schema::{
    DecodedValue, Dialect, EnumRegistry, FieldDescriptor, FieldKind, FieldMap, FieldOffset,
    Result as SchemaResult, Schema, SchemaError, decode, encode, offsets,
};
