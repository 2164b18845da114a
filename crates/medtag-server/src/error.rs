//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use medtag_store::StoreError;

/// Application-level errors with HTTP status code mapping.
///
/// Every variant renders as `{"error": message}` with the raw message in
/// the body; nothing is hidden from the client.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input (400).
    Validation(String),
    /// Duplicate unique key (400).
    Conflict(String),
    /// Bad credentials (401).
    Authentication(String),
    /// Failed admin gate (400).
    Authorization(String),
    /// Missing resource (404).
    NotFound(String),
    /// Everything else (500).
    Internal(String),
}

impl AppError {
    /// Creates an Internal error from any error type.
    pub fn internal(e: impl std::fmt::Display) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AppError::Conflict(e.to_string()),
            StoreError::UserNotFound | StoreError::FileNotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            StoreError::InvalidFilename(_) => AppError::Validation(e.to_string()),
            // The image-listing and fetch paths report a missing directory
            // as a server error, not a 404.
            StoreError::DirMissing => AppError::Internal(e.to_string()),
            StoreError::Database(_)
            | StoreError::Lock
            | StoreError::Serialization(_)
            | StoreError::Io(_)
            | StoreError::InvalidLabelId(_) => AppError::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(m) | AppError::Conflict(m) | AppError::Authorization(m) => {
                (StatusCode::BAD_REQUEST, m)
            }
            AppError::Authentication(m) => (StatusCode::UNAUTHORIZED, m),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
