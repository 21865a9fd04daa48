//! Response Cache Middleware
//!
//! Sits in front of the routed handlers: answers repeat GET requests from
//! the store and captures fresh handler output on the way back out. The
//! middleware owns the whole capture path, so a payload is stored at most
//! once per request and the caller always receives exactly the bytes the
//! handler emitted.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tower_sessions::Session;
use tracing::{debug, error, warn};

use super::{derive_key, parse_query, take_refresh_flag, MAX_CACHEABLE_BODY};
use crate::error::ApiError;
use crate::routing::API_PREFIX;
use crate::session::{SessionUser, SESSION_USER_KEY};
use crate::state::AppState;

// == Middleware ==
/// Consults and populates the response cache around the inner handler.
///
/// Only `GET` requests under `/api` carrying a session identity are
/// cacheable; everything else passes through untouched. The reserved
/// `noCache=true` query flag invalidates the entry first, so the handler
/// re-executes and repopulates it.
pub async fn response_cache(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET || !under_api_prefix(req.uri().path()) {
        return next.run(req).await;
    }

    // Anonymous requests bypass the cache entirely
    let identity = match session_identity(&req).await {
        Some(identity) => identity,
        None => return next.run(req).await,
    };

    let path = req.uri().path().to_string();
    let mut query = parse_query(req.uri().query().unwrap_or(""));
    let force_refresh = take_refresh_flag(&mut query);
    let key = derive_key(&identity, &path, &query);

    if force_refresh {
        // Invalidate and fall through; the capture below repopulates
        state.cache.write().await.delete(&key);
        debug!("Cache refresh forced for {}", key);
    } else {
        // Write lock: expiry removal and hit/miss accounting mutate the store
        if let Some(cached) = state.cache.write().await.get(&key) {
            debug!("Cache hit for {}", key);
            return cached_response(cached);
        }
        debug!("Cache miss for {}", key);
    }

    let response = next.run(req).await;
    capture_response(&state, key, response).await
}

// == Path Check ==
/// True for `/api` itself and anything below it.
fn under_api_prefix(path: &str) -> bool {
    match path.strip_prefix(API_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

// == Session Identity ==
/// Extracts the cache partition identity from the request's session, if any.
async fn session_identity(req: &Request) -> Option<String> {
    let session = req.extensions().get::<Session>()?;
    match session.get::<SessionUser>(SESSION_USER_KEY).await {
        Ok(user) => user.map(|user| user.email),
        Err(err) => {
            // A broken session store downgrades to uncached, not to a failure
            warn!("Session lookup failed, serving uncached: {}", err);
            None
        }
    }
}

// == Hit Path ==
/// Builds a response from stored bytes.
fn cached_response(bytes: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], bytes).into_response()
}

// == Miss Path ==
/// Buffers the handler's response, stores cacheable payloads and re-emits
/// the identical bytes to the caller.
///
/// Only successful JSON responses within the size bound are stored; others
/// pass through unchanged.
async fn capture_response(state: &AppState, key: String, response: Response) -> Response {
    if !response.status().is_success() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false);

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Failed to buffer response body for {}: {}", key, err);
            return ApiError::Internal("Response body unreadable".to_string()).into_response();
        }
    };

    if is_json && bytes.len() <= MAX_CACHEABLE_BODY {
        state.cache.write().await.set(key, bytes.clone());
    }

    Response::from_parts(parts, Body::from(bytes))
}

// TEMP PROBE - delete me
const _: () = {
    fn assert_send<T: Send>(_: T) {}
    #[allow(dead_code)]
    fn probe(state: State<AppState>, req: Request, next: Next) {
        assert_send(response_cache(state, req, next));
    }
};
