//! Error types for configuration loading

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer failed to parse or the merged value failed to deserialize
    #[error("configuration error: {0}")]
    Load(#[from] figment::Error),
}
