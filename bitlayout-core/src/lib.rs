//! # bitlayout-core
//!
//! Bit-level codec kernel for schema-driven layouts.
//!
//! This crate provides:
//! - Bit-span arithmetic mapping bit offsets to byte/bit addresses
//! - A scalar codec for unsigned, signed (two's complement) and boolean
//!   values at arbitrary bit offsets and widths (1..=32 bits)
//! - A byte-block codec for byte-aligned arrays with an exact uppercase
//!   hex round-trip
//! - Error types for all codec failure modes
//!
//! Bit 0 of a buffer is the most significant bit of byte 0; fields pack
//! contiguously with no implicit padding. The codec is stateless and never
//! retains a buffer reference beyond a single call.

pub mod bits;
pub mod block;
pub mod error;
pub mod scalar;

pub use bits::BitSpan;
pub use block::{decode_bytes, encode_bytes, parse_hex, to_hex};
pub use error::{Error, Result};
pub use scalar::{
    MAX_SCALAR_BITS, check_int_range, check_uint_range, decode_bool, decode_int, decode_uint,
    encode_bool, encode_int, encode_uint,
};
