//! Application Assembly
//!
//! Wires discovered routes, the built-in endpoints and the middleware stack
//! into the final Axum application.
//!
//! Layer order matters: the session layer sits outside the response cache so
//! the cache can read the identity the session layer attaches, and panic
//! containment wraps both so a crashing handler surfaces as a generic 500
//! instead of a dropped connection.

use std::any::Any;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::cache::response_cache;
use crate::config::Config;
use crate::error::Result;
use crate::models::HealthResponse;
use crate::routing::{HandlerRegistry, LoadedRoutes};
use crate::session::session_layer;
use crate::state::AppState;
use crate::users;

// == Handler Registry ==

/// Builds the registry of named handlers route files can bind.
///
/// Keys mirror the on-disk layout under the routes root: directory path plus
/// file stem, `/`-separated, extension stripped.
pub fn default_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("user/post-register", users::register);
    registry.register("user/post-login", users::login);
    registry.register("user/post-logout", users::logout);
    registry.register("user/get-info", users::info);
    registry.register("cache/get-stats", cache_stats);
    registry
}

/// Reports the response cache's statistics snapshot
async fn cache_stats(state: AppState, _req: Request) -> Result<Response> {
    let stats = state.cache.read().await.stats();
    Ok(Json(stats).into_response())
}

// == Application ==

/// Assembles the full application from discovered routes.
///
/// # Arguments
/// * `config` - Decides whether the cache middleware is mounted and how the
///   session cookie behaves
/// * `state` - Shared cache and user store handed to every handler
/// * `loaded` - Outcome of the route discovery walk
pub fn build_app(config: &Config, state: AppState, loaded: LoadedRoutes) -> Router {
    let mut router = loaded
        .apply(Router::new())
        .route("/health", get(health_handler))
        .fallback(not_found_handler);

    if config.cache.enabled {
        router = router.layer(middleware::from_fn_with_state(
            state.clone(),
            response_cache,
        ));
    }

    router
        .layer(session_layer(&config.session))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// == Built-in Handlers ==

/// Liveness endpoint, outside the `/api` tree and never cached
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for requests no discovered route matches
async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

/// Converts a handler panic into the generic internal-error response
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

// == Unit Tests ==
