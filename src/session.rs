//! Session Module
//!
//! The session-carried principal and the cookie layer construction.

use serde::{Deserialize, Serialize};
use tower_sessions::{cookie::time::Duration, Expiry, MemoryStore, SessionManagerLayer};

use crate::config::SessionConfig;

// == Public Constants ==
/// Session key under which the signed-in principal is stored
pub const SESSION_USER_KEY: &str = "user";

// == Session User ==
/// The authenticated principal carried by a session.
///
/// The email doubles as the cache partition identity. Also serves as the
/// user payload in API responses, hence the camelCase field names on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// == Session Layer ==
/// Builds the session cookie layer from configuration.
///
/// Backed by an in-memory session store; persistent session storage stays an
/// external collaborator.
pub fn session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            config.cookie_max_age,
        )))
}
