//! Error types for the batch engine

use thiserror::Error;

/// Result type alias for the batch engine
pub type Result<T> = std::result::Result<T, JournalError>;

/// Crate-level error type
///
/// Per-Group problems (validation failures, API rejections) are never
/// surfaced through this type; they end up in the rows and in the batch
/// report. `JournalError` covers what stops a run before it starts.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Row table rejected as a whole
    #[error("Invalid row table: {0}")]
    InvalidTable(String),
}
