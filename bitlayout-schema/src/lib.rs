//! # BitLayout Schema
//!
//! Schema model and layout walker for bit-level binary layouts.
//!
//! This crate provides:
//! - Immutable field descriptors for uint/int/bool/enum/byte-array/reserved
//!   fields and repeated groups
//! - Dialect rules for EEPROM images and radio packets
//! - Structural validation at schema construction time
//! - A layout walker that decodes, encodes and enumerates field offsets with
//!   a single offset-assignment rule
//! - A process-wide enum registry that detects conflicting enum definitions
//!   across schemas

pub mod error;
pub mod registry;
pub mod types;
pub mod walker;

mod validation;

pub use error::{Result, SchemaError};
pub use registry::EnumRegistry;
pub use types::{DecodedValue, Dialect, FieldDescriptor, FieldKind, Schema};
pub use walker::{FieldMap, FieldOffset, decode, encode, offsets};
