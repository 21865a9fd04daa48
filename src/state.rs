//! Application State Module
//!
//! Shared state handed to every handler and middleware: the response cache
//! and the user store, constructed once at startup and dependency-injected
//! through the router.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::users::{InMemoryUserStore, UserStore};

/// Thread-safe handle to the response cache.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == App State ==
/// Dependency-injected application state.
///
/// Cloned per request by the router; clones share the same underlying
/// instances.
#[derive(Clone)]
pub struct AppState {
    /// Response cache store
    pub cache: SharedCache,
    /// User persistence seam
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    // == Constructor ==
    /// Creates state from explicit collaborator instances.
    pub fn new(cache: CacheStore, users: Arc<dyn UserStore>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            users,
        }
    }

    /// Creates state from configuration, backed by the in-memory user store.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::from_config(&config.cache);
        Self::new(cache, Arc::new(InMemoryUserStore::new()))
    }
}
