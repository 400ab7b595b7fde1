use std::sync::PoisonError;
use thiserror::Error;

/// Error type for series source operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No stored document matches the requested user, date and domain
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The document does not have the `{metadata, timeseries[]}` shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// A time series entry is missing numeric values
    #[error("Malformed observation at index {index}: {reason}")]
    MalformedObservation { index: usize, reason: String },

    /// The user or date cannot address a stored document
    #[error("Invalid series key: {0}")]
    InvalidKey(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}
