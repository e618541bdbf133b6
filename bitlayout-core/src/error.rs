//! Error types for bitlayout core operations.

use thiserror::Error;

/// Core error type for codec operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value falls outside the declared `[min, max]` range.
    ///
    /// The codec reports this to the caller and never clamps.
    #[error("value {value} out of range [{min}, {max}]")]
    RangeViolation {
        /// Offending value (sign-extended for signed fields).
        value: i64,
        /// Declared minimum.
        min: i64,
        /// Declared maximum.
        max: i64,
    },

    /// A byte-array field does not start at a byte boundary.
    #[error("byte-array field at bit {start_bit} is not byte-aligned")]
    MisalignedField {
        /// Bit offset of the field's first bit.
        start_bit: usize,
    },

    /// Malformed hex string during byte-array text round-trip.
    #[error("invalid hex string: {reason}")]
    InvalidHex {
        /// What made the string invalid.
        reason: String,
    },

    /// A scalar bit width outside the supported range.
    #[error("invalid bit width {bits}: must be between {min} and 32")]
    InvalidBitWidth {
        /// Requested width in bits.
        bits: u32,
        /// Minimum width for the operation (2 for signed fields).
        min: u32,
    },

    /// The buffer cannot contain the addressed bit span.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required buffer size in bytes.
        required: usize,
        /// Available buffer size in bytes.
        available: usize,
    },
}

/// Result type alias for bitlayout core operations.
pub type Result<T> = std::result::Result<T, Error>;
