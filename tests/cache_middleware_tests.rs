//! Integration Tests for the Response Cache Middleware
//!
//! Proves the caching contract end to end with a counting handler: a cache
//! hit answers without re-running the handler, a refresh flag forces
//! re-execution, and anonymous or non-GET traffic always reaches the
//! handler.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use routefs::config::CacheConfig;
use routefs::error::ApiError;
use routefs::routing::{HandlerRegistry, RouteLoader};
use routefs::server::{build_app, default_registry};
use routefs::{AppState, Config};

// == Helper Functions ==

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "# route marker\n").unwrap();
}

/// Registry with the standard handlers plus counting handlers that record
/// every execution
fn counting_registry(counter: Arc<AtomicUsize>) -> HandlerRegistry {
    let mut registry = default_registry();

    let get_counter = Arc::clone(&counter);
    registry.register(
        "counter/get-value",
        move |_state: AppState, _req: axum::extract::Request| {
            let counter = Arc::clone(&get_counter);
            async move {
                let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok::<_, ApiError>(Json(json!({ "count": count })).into_response())
            }
        },
    );

    let post_counter = Arc::clone(&counter);
    registry.register(
        "counter/post-value",
        move |_state: AppState, _req: axum::extract::Request| {
            let counter = Arc::clone(&post_counter);
            async move {
                let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok::<_, ApiError>(Json(json!({ "count": count })).into_response())
            }
        },
    );

    registry
}

/// Builds an app with user routes, both counter routes and a fresh counter
fn create_test_app(dir: &Path, cache_enabled: bool) -> (Router, Arc<AtomicUsize>) {
    touch(dir, "user/post-register.route");
    touch(dir, "user/post-login.route");
    touch(dir, "user/get-info.route");
    touch(dir, "counter/get-value.route");
    touch(dir, "counter/post-value.route");
    touch(dir, "cache/get-stats.route");

    let config = Config {
        routes_dir: dir.to_path_buf(),
        cache: CacheConfig {
            enabled: cache_enabled,
            ..CacheConfig::default()
        },
        ..Config::default()
    };
    let counter = Arc::new(AtomicUsize::new(0));
    let registry = counting_registry(Arc::clone(&counter));
    let state = AppState::from_config(&config);
    let loaded = RouteLoader::new(&registry).load(dir).unwrap();
    (build_app(&config, state, loaded), counter)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Registers and logs in a user, returning the session cookie
async fn login_as(app: &Router, email: &str) -> String {
    let register = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/user/register")
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{"email":"{email}","firstName":"Ada","lastName":"Lovelace","password_hash":"a1b2c3"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(register.status(), StatusCode::CREATED);

    let login = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/user/login")
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{"email":"{email}","password":"a1b2c3"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    session_cookie(&login)
}

/// Issues a GET and returns the JSON body
async fn get_json(app: &Router, uri: &str, cookie: Option<&str>) -> Value {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

// == Hit Path Tests ==

#[tokio::test]
async fn test_cache_hit_skips_handler() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), true);
    let cookie = login_as(&app, "ada@example.com").await;

    let first = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(first["count"], 1);

    // Second request is answered from the cache with the identical payload
    let second = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(second["count"], 1);

    assert_eq!(counter.load(Ordering::SeqCst), 1, "handler ran exactly once");
}

#[tokio::test]
async fn test_refresh_flag_forces_handler_execution() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), true);
    let cookie = login_as(&app, "ada@example.com").await;

    let first = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(first["count"], 1);
    let cached = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(cached["count"], 1);

    // The flag invalidates the entry and re-runs the handler
    let refreshed = get_json(&app, "/api/counter/value?noCache=true", Some(&cookie)).await;
    assert_eq!(refreshed["count"], 2);

    // The refreshed response replaced the cached entry
    let after = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(after["count"], 2);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

// == Bypass Tests ==

#[tokio::test]
async fn test_anonymous_requests_are_not_cached() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), true);

    let first = get_json(&app, "/api/counter/value", None).await;
    assert_eq!(first["count"], 1);
    let second = get_json(&app, "/api/counter/value", None).await;
    assert_eq!(second["count"], 2);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_non_get_requests_bypass_cache() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), true);
    let cookie = login_as(&app, "ada@example.com").await;

    for expected in 1..=2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/counter/value")
                    .header(header::COOKIE, cookie.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["count"], expected);
    }

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_disabled_cache_serves_fresh_responses() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), false);
    let cookie = login_as(&app, "ada@example.com").await;

    let first = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(first["count"], 1);
    let second = get_json(&app, "/api/counter/value", Some(&cookie)).await;
    assert_eq!(second["count"], 2);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

// == Partitioning Tests ==

#[tokio::test]
async fn test_identities_have_disjoint_caches() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), true);
    let ada = login_as(&app, "ada@example.com").await;
    let grace = login_as(&app, "grace@example.com").await;

    let ada_first = get_json(&app, "/api/counter/value", Some(&ada)).await;
    assert_eq!(ada_first["count"], 1);

    // Grace's first request misses her own partition and runs the handler
    let grace_first = get_json(&app, "/api/counter/value", Some(&grace)).await;
    assert_eq!(grace_first["count"], 2);

    // Each identity keeps seeing its own cached copy
    let ada_again = get_json(&app, "/api/counter/value", Some(&ada)).await;
    assert_eq!(ada_again["count"], 1);
    let grace_again = get_json(&app, "/api/counter/value", Some(&grace)).await;
    assert_eq!(grace_again["count"], 2);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_query_parameters_partition_cache() {
    let dir = TempDir::new().unwrap();
    let (app, counter) = create_test_app(dir.path(), true);
    let cookie = login_as(&app, "ada@example.com").await;

    let page_one = get_json(&app, "/api/counter/value?page=1", Some(&cookie)).await;
    assert_eq!(page_one["count"], 1);
    let page_two = get_json(&app, "/api/counter/value?page=2", Some(&cookie)).await;
    assert_eq!(page_two["count"], 2);

    // Repeating a query hits the entry stored for it
    let page_one_again = get_json(&app, "/api/counter/value?page=1", Some(&cookie)).await;
    assert_eq!(page_one_again["count"], 1);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

// == Statistics Tests ==

#[tokio::test]
async fn test_stats_reflect_cache_traffic() {
    let dir = TempDir::new().unwrap();
    let (app, _counter) = create_test_app(dir.path(), true);
    let cookie = login_as(&app, "ada@example.com").await;

    // One miss, one hit on the counter route
    get_json(&app, "/api/counter/value", Some(&cookie)).await;
    get_json(&app, "/api/counter/value", Some(&cookie)).await;

    // The stats request itself flows through the cache and records a miss
    // before the handler snapshots the counters
    let stats = get_json(&app, "/api/cache/stats", Some(&cookie)).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 2);
    assert_eq!(stats["evictions"], 0);
    assert_eq!(stats["size"], 1);
    assert_eq!(stats["max_capacity"], 500);
}
