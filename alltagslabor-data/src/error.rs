//! Error types for remote content access
//!
//! This module defines the error type shared by the source client, the
//! content cache and the record decoders. Callers map the variant to a
//! user-facing outcome (the API turns `NotFound` into a 404 and everything
//! else into a 500).

use thiserror::Error;

/// Main error type for the data layer
#[derive(Error, Debug, Clone)]
pub enum DataError {
    /// The remote content host could not be reached, answered with a
    /// non-success status, or timed out
    #[error("Error fetching {filename}: {reason}")]
    Fetch { filename: String, reason: String },

    /// A lookup by natural key found no record
    #[error("{0} not found")]
    NotFound(String),

    /// Remote payload does not have the expected shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for data layer operations
pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    /// Build a fetch error for the given remote file
    pub fn fetch(filename: impl Into<String>, reason: impl ToString) -> Self {
        DataError::Fetch {
            filename: filename.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error is an expected "no such record" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Validation(e.to_string())
    }
}
