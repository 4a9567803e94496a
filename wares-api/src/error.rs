//! Error Types for the WARES API
//!
//! Defines the typed error surface of the API layer and its mapping to
//! the wire contract the catalog's consumers expect: not-found renders
//! as a structured 404 payload, every other failure as a generic 500
//! carrying the raw error text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use wares_core::GoodsError;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request validation failed
    ValidationFailed,

    /// Project identifier is non-positive or malformed
    InvalidProjectId,

    /// Goods identifier is non-positive or malformed
    InvalidGoodsId,

    /// Referenced project does not exist
    ProjectNotExist,

    /// No matching non-removed goods row
    GoodsNotFound,

    /// Database operation failed
    DatabaseError,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code. Only not-found has a dedicated
    /// status; every other failure is reported as a generic 500 with
    /// the raw error text.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::GoodsNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error returned by API handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create an InvalidProjectId error.
    pub fn invalid_project_id() -> Self {
        Self::new(ErrorCode::InvalidProjectId, "invalid project ID")
    }

    /// Create a GoodsNotFound error.
    pub fn not_found() -> Self {
        Self::new(ErrorCode::GoodsNotFound, "goods not found")
    }

    /// Create a DatabaseError.
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Numeric code carried by the structured not-found payload.
const NOT_FOUND_WIRE_CODE: u8 = 3;

/// Message key carried by the structured not-found payload.
const NOT_FOUND_WIRE_MESSAGE: &str = "errors.common.notFound";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.code {
            ErrorCode::GoodsNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "code": NOT_FOUND_WIRE_CODE,
                    "message": NOT_FOUND_WIRE_MESSAGE,
                    "details": {},
                })),
            )
                .into_response(),
            _ => (
                self.status_code(),
                Json(json!({ "error": self.message })),
            )
                .into_response(),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<GoodsError> for ApiError {
    fn from(err: GoodsError) -> Self {
        let code = match &err {
            GoodsError::Validation(_) => ErrorCode::ValidationFailed,
            GoodsError::InvalidProjectId => ErrorCode::InvalidProjectId,
            GoodsError::InvalidGoodsId => ErrorCode::InvalidGoodsId,
            GoodsError::ProjectNotExist => ErrorCode::ProjectNotExist,
            GoodsError::NotFound => ErrorCode::GoodsNotFound,
            GoodsError::Store(_) => ErrorCode::DatabaseError,
        };
        ApiError::new(code, err.to_string())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
