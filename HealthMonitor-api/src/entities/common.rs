use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use health_monitor_domain::services::{ClassificationError, HealthDataServiceError};

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.into(),
            details,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    /// HTTP status matching the error code
    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" | "no_data" => StatusCode::NOT_FOUND,
            "validation_error" | "bad_request" => StatusCode::BAD_REQUEST,
            "schema_error" | "malformed_observation" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<HealthDataServiceError> for ErrorResponse {
    fn from(err: HealthDataServiceError) -> Self {
        match err {
            HealthDataServiceError::ValidationError(msg) => Self::validation_error(msg, None),
            HealthDataServiceError::NotFound(msg) => Self::not_found(msg),
            HealthDataServiceError::SchemaError(msg) => Self {
                error: "schema_error".to_string(),
                message: format!("Stored document is not valid: {}", msg),
                details: None,
            },
            HealthDataServiceError::Classification(ClassificationError::EmptySeries) => Self {
                error: "no_data".to_string(),
                message: "The series holds no observations".to_string(),
                details: None,
            },
            HealthDataServiceError::Classification(ClassificationError::MalformedObservation {
                index,
                reason,
            }) => Self {
                error: "malformed_observation".to_string(),
                message: format!("Observation {} is malformed", index),
                details: Some(json!({ "index": index, "reason": reason })),
            },
            HealthDataServiceError::StorageError(msg) => {
                error!("Storage error while serving request: {}", msg);
                Self::internal_error()
            }
        }
    }
}

/// Simple message body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
