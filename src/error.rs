//! Error types for the server
//!
//! Two taxonomies: request-path failures that map onto HTTP responses, and
//! the fatal route-discovery outcome that aborts startup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::routing::HttpMethod;

// == Api Error Enum ==
/// Unified error type for request handling.
///
/// Client-class variants carry a message that is safe to return to the
/// caller. `Internal` never exposes its message: the detail is logged at the
/// point of failure and the response body stays generic.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request data is missing or malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No valid session / credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    // == Is Internal ==
    /// True for failures that must be reported generically to the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Internal(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            // Raw detail never reaches the client
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ApiError::Internal(format!("Session store failure: {err}"))
    }
}

// == Load Error Enum ==
/// Fatal outcomes of route discovery.
///
/// Everything else that can go wrong during discovery is a logged warning
/// (see `routing::loader`); a collision is the one condition that aborts
/// startup, since the dispatcher would otherwise silently serve whichever
/// registration happened to land last.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// Two route files resolved to the same (method, path) pair
    #[error("Duplicate route registration: {method} {path}")]
    RouteCollision { method: HttpMethod, path: String },
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, ApiError>;
