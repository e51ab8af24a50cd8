// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the service and the diagnostics

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One enum shared by the community store, the Supabase client
/// and the HTTP handlers. Each variant maps to an HTTP status code.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FinderError {
    /// Stable machine-readable code used in the JSON error envelope
    pub fn code(&self) -> &'static str {
        match self {
            FinderError::NotFound(_) => "NOT_FOUND",
            FinderError::DatabaseError(_) => "DATABASE_ERROR",
            FinderError::InvalidInput(_) => "INVALID_INPUT",
            FinderError::ValidationError(_) => "VALIDATION_ERROR",
            FinderError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            FinderError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for FinderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        FinderError::ValidationError(errors.to_string())
    }
}

/// Convert FinderError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for FinderError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            FinderError::NotFound(_) => StatusCode::NOT_FOUND,
            FinderError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FinderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FinderError::ValidationError(_) => StatusCode::BAD_REQUEST,
            FinderError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            FinderError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
