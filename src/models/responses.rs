//! Response DTOs for the user API
//!
//! Outgoing HTTP body shapes; field casing matches what browsers already
//! consume from this API.

use serde::Serialize;

use crate::session::SessionUser;

/// Response body for account creation (POST /api/user/register)
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    /// The created account, without the credential
    pub user: SessionUser,
}

impl RegisterResponse {
    /// Creates a new RegisterResponse
    pub fn new(user: SessionUser) -> Self {
        Self { user }
    }
}

/// Response body for login and logout
#[derive(Debug, Clone, Serialize)]
pub struct RedirectResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Client-side destination after the operation
    pub redirect: String,
}

impl RedirectResponse {
    /// Creates a successful response redirecting to the given target
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            success: true,
            redirect: target.into(),
        }
    }
}

/// Response body for the profile endpoint (GET /api/user/info)
#[derive(Debug, Clone, Serialize)]
pub struct UserInfoResponse {
    /// Whether the lookup succeeded
    pub success: bool,
    /// The current account
    pub user: SessionUser,
}

impl UserInfoResponse {
    /// Creates a new UserInfoResponse
    pub fn new(user: SessionUser) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Failure body carrying an explicit `success: false` flag
#[derive(Debug, Clone, Serialize)]
pub struct FailureResponse {
    /// Always false
    pub success: bool,
    /// What went wrong, in client-facing words
    pub error: String,
}

impl FailureResponse {
    /// Builds a failure body with the given message
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Response body for the liveness endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Fixed "healthy" marker
    pub status: String,
    /// Moment the probe was answered, RFC 3339
    pub timestamp: String,
}

impl HealthResponse {
    /// Builds a healthy probe answer stamped with the current time
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
