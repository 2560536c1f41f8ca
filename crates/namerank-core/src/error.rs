//! Error types for namerank
//!
//! Scoring and author matching never fail. Errors only come from the grouping
//! precondition and from the I/O edges that feed records in.

use thiserror::Error;

/// Result type alias for namerank operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Grouping was asked for on a record whose candidates were never sorted.
    #[error("match record {input_id:?} is not sorted")]
    Unsorted { input_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error type string (for JSON responses)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Unsorted { .. } => "UNSORTED_RECORD",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
