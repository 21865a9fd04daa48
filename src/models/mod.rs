//! Request and Response models for the user API
//!
//! Serde shapes for the HTTP bodies the handlers read and write.

pub mod requests;
pub mod responses;

// Re-export the handler-facing types
pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{
    FailureResponse, HealthResponse, RedirectResponse, RegisterResponse, UserInfoResponse,
};
