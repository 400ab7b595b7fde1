use thiserror::Error;
use tracing::error;

use health_monitor_data::repository::RepositoryError;

use super::classifier::ClassificationError;

/// Errors returned by the health data services
#[derive(Debug, Error)]
pub enum HealthDataServiceError {
    /// Request parameters could not address a series
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No stored document for the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// The stored document is not shaped as expected
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Classification failed (empty series or malformed observation)
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// Underlying storage failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Map repository errors to service errors
pub fn map_repo_error(err: RepositoryError) -> HealthDataServiceError {
    match err {
        RepositoryError::NotFound(msg) => HealthDataServiceError::NotFound(msg),
        RepositoryError::Schema(msg) => HealthDataServiceError::SchemaError(msg),
        RepositoryError::MalformedObservation { index, reason } => {
            ClassificationError::MalformedObservation { index, reason }.into()
        }
        RepositoryError::InvalidKey(msg) => HealthDataServiceError::ValidationError(msg),
        other => {
            error!("Storage failure: {}", other);
            HealthDataServiceError::StorageError(other.to_string())
        }
    }
}
