//! Error types for the form engine

use formsmith_fields::FieldsError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in form store and session operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Form not found by id
    #[error("form not found: {id}")]
    FormNotFound { id: String },

    /// Field not found within a form
    #[error("field not found: {id}")]
    FieldNotFound { id: String },

    /// Form name was empty or whitespace
    #[error("form name must not be empty")]
    EmptyFormName,

    /// Field label was empty or whitespace
    #[error("field label must not be empty")]
    EmptyFieldLabel,

    /// A choice field was configured without options
    #[error("field '{label}' requires options")]
    MissingOptions { label: String },

    /// Reorder list did not cover the form's fields exactly once
    #[error("reorder list must contain each field id exactly once")]
    InvalidReorder,

    /// Schema error from field derivation
    #[error("schema error: {0}")]
    Fields(#[from] FieldsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create a form-not-found error.
    pub fn form_not_found(id: impl ToString) -> Self {
        Self::FormNotFound { id: id.to_string() }
    }

    /// Create a field-not-found error.
    pub fn field_not_found(id: impl ToString) -> Self {
        Self::FieldNotFound { id: id.to_string() }
    }

    /// Create a missing-options error for the given field label.
    pub fn missing_options(label: impl Into<String>) -> Self {
        Self::MissingOptions {
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::form_not_found("01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(err.to_string(), "form not found: 01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_fields_error_wraps() {
        let err: EngineError = FieldsError::duplicate_key("email").into();
        assert!(err.to_string().contains("duplicate field key: email"));
    }

    #[test]
    fn test_missing_options_display() {
        let err = EngineError::missing_options("Color");
        assert_eq!(err.to_string(), "field 'Color' requires options");
    }
}
