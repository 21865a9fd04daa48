//! Handler Registry Module
//!
//! Statically typed handler lookup for discovered route files.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{extract::Request, response::Response};

use crate::error::Result;
use crate::state::AppState;

// == Handler Types ==
/// Boxed future every registered handler resolves to.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send>>;

/// A registered request handler, shared and callable from any worker.
pub type RouteHandler = Arc<dyn Fn(AppState, Request) -> HandlerFuture + Send + Sync>;

// == Handler Registry ==
/// Maps a route file's root-relative stem (e.g. `user/post-login`) to its
/// handler.
///
/// The compile-time counterpart of the on-disk route tree: the tree declares
/// method and path through file names, the registry supplies the code. A tree
/// entry with no registry entry is skipped with a warning at discovery time.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, RouteHandler>,
}

impl HandlerRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    // == Register ==
    /// Registers a handler under a route file stem.
    ///
    /// Registering the same stem twice replaces the earlier handler; route
    /// collision detection happens on `(method, path)` during discovery, not
    /// here.
    ///
    /// # Arguments
    /// * `stem` - Root-relative file stem, `/`-separated, extension stripped
    /// * `handler` - Async handler taking the shared state and the request
    pub fn register<F, Fut>(&mut self, stem: &str, handler: F)
    where
        F: Fn(AppState, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        let wrapped: RouteHandler = Arc::new(move |state, req| Box::pin(handler(state, req)));
        self.handlers.insert(stem.to_string(), wrapped);
    }

    // == Get ==
    /// Looks up the handler registered under a stem.
    pub fn get(&self, stem: &str) -> Option<RouteHandler> {
        self.handlers.get(stem).cloned()
    }

    // == Length ==
    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
