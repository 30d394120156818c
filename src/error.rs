//! Application error types and result alias.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (missing file, missing required field, malformed PIN)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Presented credential does not have the expected PIN format
    #[error("Credential must be a 4-digit PIN")]
    InvalidCredentialFormat,

    /// Malformed admin identity input
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authorization error
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Presented secret or PIN does not match the stored credential.
    /// Kept distinct from [`AppError::Forbidden`] even though both map to
    /// 403, so callers and tests can tell the two apart.
    #[error("Credential mismatch")]
    CredentialMismatch,

    /// Blob store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Address parse error
    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidCredentialFormat => (
                StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIAL_FORMAT",
                self.to_string(),
            ),
            AppError::InvalidIdentity(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_IDENTITY", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::CredentialMismatch => (
                StatusCode::FORBIDDEN,
                "CREDENTIAL_MISMATCH",
                self.to_string(),
            ),
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                msg.clone(),
            ),
            AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                "IO operation failed".to_string(),
            ),
            AppError::AddrParse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ADDR_PARSE_ERROR",
                "Invalid address".to_string(),
            ),
            AppError::Json(_) => (
                StatusCode::BAD_REQUEST,
                "JSON_ERROR",
                "Invalid JSON".to_string(),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        // Log the error
        tracing::error!(error = %self, code = code, "Request error");

        let body = Json(json!({
            "code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
