//! Error types for the field type system

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when deriving schemas from field definitions
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A field's label reduced to a blank key
    #[error("field '{label}' has a blank key")]
    BlankKey { label: String },

    /// Two fields in the same form share a key
    #[error("duplicate field key: {key}")]
    DuplicateKey { key: String },
}

impl FieldsError {
    /// Create a blank-key error for the given label.
    pub fn blank_key(label: impl Into<String>) -> Self {
        Self::BlankKey {
            label: label.into(),
        }
    }

    /// Create a duplicate-key error.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }
}
