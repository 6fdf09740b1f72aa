//! Error types for the cache and its HTTP front end
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache core and server.
///
/// A cache miss is not an error: lookups report it as `None`. `NotFound`
/// only exists so the HTTP layer can turn a miss into a 404.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found (absent or expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Capacity must be a positive integer
    #[error("Invalid capacity {0}: capacity must be a positive integer")]
    InvalidCapacity(i64),

    /// TTL must be non-negative
    #[error("Invalid TTL {0}: ttl must be non-negative")]
    InvalidTtl(i64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidCapacity(_)
            | CacheError::InvalidTtl(_)
            | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
