//! User Persistence Layer
//!
//! Defines the `UserStore` trait the handlers depend on and an in-memory
//! implementation backing it. Handlers receive the store through
//! `AppState`, so swapping in a database-backed implementation only
//! requires a new trait impl.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};

// == User Record ==

/// A stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// == Store Trait ==

/// Persistence seam for user accounts
///
/// All methods are async so network-backed implementations fit without
/// changing the handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Checks that the backing store is reachable
    ///
    /// Called once at startup; a failure aborts the boot sequence.
    async fn ping(&self) -> Result<()>;

    /// Looks up a user by email
    ///
    /// # Returns
    /// * `Ok(Some(user))` - Account exists
    /// * `Ok(None)` - No account under that email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Inserts a new user account
    ///
    /// # Returns
    /// * `Err(ApiError::Conflict)` - An account already exists for the email
    async fn insert(&self, user: User) -> Result<()>;

    /// Checks the supplied credential against the stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Account exists and the credential matches
    /// * `Ok(false)` - Unknown account or mismatch
    async fn verify_password(&self, email: &str, password_hash: &str) -> Result<bool>;
}

// == In-Memory Implementation ==

/// Process-local user store keyed by email
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user, returning whether one was present
    #[cfg(test)]
    pub async fn remove(&self, email: &str) -> bool {
        self.users.write().await.remove(email).is_some()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn ping(&self) -> Result<()> {
        // Nothing to reach; the map is always available
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn verify_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users
            .get(email)
            .map(|user| user.password_hash == password_hash)
            .unwrap_or(false))
    }
}

// == Tests ==
