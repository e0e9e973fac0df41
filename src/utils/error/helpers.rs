//! Helper functions for creating specific error types

use super::types::SeedError;
use std::path::Path;

impl SeedError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedSource(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn source_unavailable(path: &Path, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Errors that abort a run before any write reaches the store
    pub fn is_fatal_before_write(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. }
                | Self::MalformedSource(_)
                | Self::Config(_)
                | Self::Validation(_)
        )
    }
}
