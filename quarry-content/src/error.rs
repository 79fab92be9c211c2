//! Error types for the content engine

use std::collections::BTreeMap;
use std::path::PathBuf;

use quarry_fields::FieldError;
use thiserror::Error;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Accumulated content validation errors, keyed `locale -> field key ->
/// message`. Only locales with at least one violation appear.
pub type DataErrors = BTreeMap<String, BTreeMap<String, String>>;

/// Errors that can occur in content operations
#[derive(Debug, Error)]
pub enum ContentError {
    /// Store not initialized at the given path
    #[error("store not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Store already initialized
    #[error("store already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    /// Collection not found by id or name
    #[error("collection not found: {identifier}")]
    CollectionNotFound { identifier: String },

    /// Entity not found
    #[error("entity not found: {id}")]
    EntityNotFound { id: String },

    /// Language not found
    #[error("language not found: {id}")]
    LanguageNotFound { id: String },

    /// Media record not found
    #[error("media not found: {id}")]
    MediaNotFound { id: String },

    /// API key not found
    #[error("key not found: {id}")]
    KeyNotFound { id: String },

    /// A globally-unique value (collection name, locale) is already taken
    #[error("{resource} '{value}' already exists")]
    Conflict { resource: String, value: String },

    /// Missing required field on a write
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value on a write
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Schema definition error from the field registry
    #[error("invalid schema: {0}")]
    Schema(#[from] FieldError),

    /// Per-locale, per-field content validation errors
    #[error("invalid entity data")]
    InvalidData { errors: DataErrors },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContentError {
    /// Create a conflict error
    pub fn conflict(resource: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
            value: value.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The nested validation error map, if this is a data error.
    pub fn data_errors(&self) -> Option<&DataErrors> {
        match self {
            Self::InvalidData { errors } => Some(errors),
            _ => None,
        }
    }
}
