//! Error types for schema construction and layout walking.

use thiserror::Error;

/// Error type for schema building, validation and walk operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two schema loads define the same enum name with incompatible tables.
    #[error(
        "enum '{name}' redefines value {key}: previously '{previous}', now '{conflicting}'; \
         either make the definitions identical or rename one"
    )]
    EnumConflict {
        /// Enum name.
        name: String,
        /// Conflicting integer key.
        key: u32,
        /// Symbol the key mapped to before.
        previous: String,
        /// Symbol the new definition maps the key to.
        conflicting: String,
    },

    /// The field tree violates a construction-time rule.
    #[error("schema validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Encode was given no value for a field.
    #[error("no value supplied for field '{field}'")]
    MissingValue {
        /// Field identifier.
        field: String,
    },

    /// Encode was given a value of the wrong variant for a field.
    #[error("value for field '{field}' has the wrong type: expected {expected}")]
    TypeMismatch {
        /// Field identifier.
        field: String,
        /// Expected value kind.
        expected: &'static str,
    },

    /// A raw or supplied enum value is not in the field's value table.
    #[error("value {value} for enum field '{field}' is not in the value table")]
    UnknownEnumValue {
        /// Field identifier.
        field: String,
        /// Offending integer value.
        value: u32,
    },

    /// A supplied byte array or group repetition count has the wrong length.
    #[error("wrong length for field '{field}': expected {expected}, got {actual}")]
    LengthMismatch {
        /// Field identifier.
        field: String,
        /// Declared length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A codec-level failure (range, alignment, hex, buffer bounds).
    #[error(transparent)]
    Codec(#[from] bitlayout_core::Error),
}

impl SchemaError {
    /// Creates a validation error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
