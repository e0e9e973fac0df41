//! Error types for the seeder

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the seeder
pub type Result<T> = std::result::Result<T, SeedError>;

/// Main error type for the seeder
#[derive(Error, Debug)]
pub enum SeedError {
    /// The fixture document could not be read
    #[error("Fixture source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fixture document does not have the expected shape
    #[error("Malformed fixture source: {0}")]
    MalformedSource(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A batch was rejected by the store; the run stopped there
    #[error("Batch {} failed: {reason}", .index + 1)]
    BatchFailed { index: usize, reason: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
