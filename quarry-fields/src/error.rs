//! Error types for the field registry

use thiserror::Error;

/// Result type for field registry operations
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors that can occur while validating field definitions.
///
/// These are all schema definition errors: they surface when a collection
/// schema is saved, never while casting content values.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Field key fails the identifier pattern or length bounds
    #[error("invalid field key '{key}': keys must be identifier-safe and at most 255 characters")]
    InvalidKey { key: String },

    /// Field label missing or too long
    #[error("invalid label for field '{key}': labels must be 1 to 255 characters")]
    InvalidLabel { key: String },

    /// Two fields in one schema share a key
    #[error("field keys must be unique - key '{key}' exists more than once")]
    DuplicateKey { key: String },

    /// Raw meta payload does not decode into the declared type's shape
    #[error("invalid meta for '{field_type}' field: {message}")]
    MetaDecode { field_type: String, message: String },

    /// Decoded meta violates one of the type's own invariants
    #[error("invalid meta for '{field_type}' field: {message}")]
    MetaInvalid { field_type: String, message: String },
}

impl FieldError {
    /// Create a meta decode error
    pub fn meta_decode(field_type: impl ToString, message: impl Into<String>) -> Self {
        Self::MetaDecode {
            field_type: field_type.to_string(),
            message: message.into(),
        }
    }

    /// Create a meta invariant error
    pub fn meta_invalid(field_type: impl ToString, message: impl Into<String>) -> Self {
        Self::MetaInvalid {
            field_type: field_type.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldError::DuplicateKey {
            key: "title".into(),
        };
        assert_eq!(
            err.to_string(),
            "field keys must be unique - key 'title' exists more than once"
        );
    }

    #[test]
    fn test_meta_error_names_type() {
        let err = FieldError::meta_invalid("relation", "collection_id is required");
        assert!(err.to_string().contains("relation"));
        assert!(err.to_string().contains("collection_id"));
    }
}
