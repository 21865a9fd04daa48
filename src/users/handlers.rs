//! User API Handlers
//!
//! Account registration, login, logout and profile lookup. Every handler
//! shares the `(AppState, Request)` signature the route registry expects,
//! so route files can bind any of them by name.
//!
//! Session state is read from the request extensions populated by the
//! session layer; the session must therefore be taken before the body is
//! consumed.

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::models::{
    FailureResponse, LoginRequest, RedirectResponse, RegisterRequest, RegisterResponse,
    UserInfoResponse,
};
use crate::session::{SessionUser, SESSION_USER_KEY};
use crate::state::AppState;
use crate::users::store::User;

// == Constants ==

/// Upper bound on buffered request bodies
const MAX_BODY_BYTES: usize = 64 * 1024;

// == Helpers ==

/// Buffers the request body and deserializes it as JSON
///
/// # Returns
/// * `Err(ApiError::BadRequest)` - Body exceeded the size limit, could not
///   be read, or was not valid JSON
async fn read_json<T: DeserializeOwned>(req: Request) -> Result<T> {
    let bytes = to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| ApiError::BadRequest("Request body unreadable".to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))
}

/// Returns the session handle installed by the session layer
fn session_of(req: &Request) -> Result<Session> {
    req.extensions()
        .get::<Session>()
        .cloned()
        .ok_or_else(|| ApiError::Internal("Session layer missing".to_string()))
}

/// Projects a stored user onto its public shape, dropping the credential
fn to_public(user: &User) -> SessionUser {
    SessionUser {
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}

// == Handlers ==

/// Creates a new user account
///
/// # Returns
/// * `201` with the created user on success
/// * `400` when any field is missing or empty
/// * `409` when the email is already registered
pub async fn register(state: AppState, req: Request) -> Result<Response> {
    let body: RegisterRequest = read_json(req).await?;
    let Some((email, first_name, last_name, password_hash)) = body.fields() else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };

    let user = User {
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password_hash: password_hash.to_string(),
        created_at: Utc::now(),
    };
    let public = to_public(&user);
    state.users.insert(user).await?;
    info!("Registered user {}", public.email);

    Ok((StatusCode::CREATED, Json(RegisterResponse::new(public))).into_response())
}

/// Authenticates a user and stores their identity in the session
///
/// # Returns
/// * `200` with a redirect target on success
/// * `401` when the credentials are missing or do not match
pub async fn login(state: AppState, req: Request) -> Result<Response> {
    let session = session_of(&req)?;
    let body: LoginRequest = read_json(req).await?;
    let Some((email, password)) = body.credentials() else {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };

    if !state.users.verify_password(email, password).await? {
        debug!("Login rejected for {}", email);
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }
    let user = state
        .users
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    session.insert(SESSION_USER_KEY, to_public(&user)).await?;
    info!("User {} logged in", email);

    Ok(Json(RedirectResponse::to("/dashboard")).into_response())
}

/// Ends the current session
///
/// Always succeeds, whether or not a user was logged in.
pub async fn logout(_state: AppState, req: Request) -> Result<Response> {
    let session = session_of(&req)?;
    session.flush().await?;
    debug!("Session flushed on logout");

    Ok(Json(RedirectResponse::to("/login")).into_response())
}

/// Returns the profile of the logged-in user
///
/// # Returns
/// * `200` with the stored account on success
/// * `401` when no user is attached to the session
/// * `404` when the session references an account that no longer exists
pub async fn info(state: AppState, req: Request) -> Result<Response> {
    let session = session_of(&req)?;
    let Some(current) = session.get::<SessionUser>(SESSION_USER_KEY).await? else {
        return Err(ApiError::Unauthorized("Not logged in".to_string()));
    };

    match state.users.find_by_email(&current.email).await? {
        Some(user) => Ok(Json(UserInfoResponse::new(to_public(&user))).into_response()),
        None => {
            debug!("Session user {} no longer exists", current.email);
            Ok((
                StatusCode::NOT_FOUND,
                Json(FailureResponse::new("User not found")),
            )
                .into_response())
        }
    }
}

// == Tests ==
