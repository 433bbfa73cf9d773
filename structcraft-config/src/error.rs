//! Error types for the config document layer.

use thiserror::Error;

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when loading or reading a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document root is not a key/value mapping.
    #[error("document root is not a mapping")]
    NotAMapping,

    /// A required key is absent.
    #[error("missing required key: {0}")]
    MissingKey(String),

    /// A key exists but holds a value of the wrong type.
    #[error("wrong type at {path}: expected {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },
}
