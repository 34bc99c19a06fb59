//! HTTP error types for tassel-ui
//!
//! One taxonomy for every route: each kind maps to a status code and a
//! structured JSON payload. Low-level diagnostics are logged server-side
//! and never leak into the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::MlError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required fields (400)
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or missing/expired session (401)
    #[error("{0}")]
    Auth(String),

    /// Unknown user/course/student (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key (409)
    #[error("{0}")]
    Conflict(String),

    /// Recommendation service unreachable or returned failure (502)
    #[error("{0}")]
    Upstream(String),

    /// Store-layer failure (500)
    #[error("Database error")]
    Database(String),

    /// Anything else (500)
    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION", msg.clone()),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, "AUTH", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM", msg.clone()),
            ApiError::Database(detail) => {
                tracing::error!(detail = %detail, "Store-layer failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<tassel_common::Error> for ApiError {
    fn from(err: tassel_common::Error) -> Self {
        use tassel_common::Error;

        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::Validation(msg),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            Error::Database(e) => {
                // Constraint violations that slip past the explicit checks
                // are still duplicates, not server faults
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.message().contains("UNIQUE constraint") {
                        return ApiError::Conflict("Duplicate entry".to_string());
                    }
                }
                ApiError::Database(e.to_string())
            }
            Error::Io(e) => ApiError::Internal(e.to_string()),
            Error::Config(msg) | Error::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<MlError> for ApiError {
    fn from(err: MlError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
