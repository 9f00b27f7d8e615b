//! Error types for the document store and its HTTP surface
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failures reported by the document store.
///
/// A missing record is never an error; lookups return `Option` and
/// mutations return `bool` for that case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Table name already registered
    #[error("Table already exists: {0}")]
    AlreadyExists(String),

    /// Table does not exist
    #[error("Table not found: {0}")]
    NotFound(String),

    /// Record cannot be stored as given
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Query document is malformed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Record absent from an existing table
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Key absent or expired in the cache
    #[error("Cache miss: {0}")]
    CacheMiss(String),

    /// Request body failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::InvalidRecord(_))
            | ApiError::Store(StoreError::InvalidQuery(_)) => StatusCode::BAD_REQUEST,
            ApiError::RecordNotFound(_) | ApiError::CacheMiss(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
