//! Convention-driven web backend with filesystem route discovery
//!
//! Boots the server: walks the routes tree, binds discovered routes to
//! their registered handlers, mounts the response cache and serves until
//! a shutdown signal arrives.

use std::net::SocketAddr;
use std::process;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routefs::routing::RouteLoader;
use routefs::server::{build_app, default_registry};
use routefs::{spawn_cleanup_task, AppState, Config};

/// Entry point for the route discovery server.
///
/// # Startup Sequence
/// 1. Tracing subscriber (RUST_LOG overrides the default filter)
/// 2. Configuration from the environment
/// 3. Shared state; an unreachable user store aborts startup
/// 4. Route discovery (a duplicate route aborts startup)
/// 5. Background TTL sweep over the response cache
/// 6. Serve until SIGINT/SIGTERM, then drain and stop the sweep
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routefs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting route discovery server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, routes_dir={}, cache_enabled={}, cache_max={}, cache_ttl={}ms",
        config.server_port,
        config.routes_dir.display(),
        config.cache.enabled,
        config.cache.max_entries,
        config.cache.ttl_ms
    );

    let state = AppState::from_config(&config);

    // Fail fast when the backing user store is unreachable
    if let Err(err) = state.users.ping().await {
        error!("User store unavailable: {}", err);
        process::exit(1);
    }
    info!("User store reachable");

    // Discover routes; a duplicate (method, path) pair is a startup error
    let registry = default_registry();
    let loaded = match RouteLoader::new(&registry).load(&config.routes_dir) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("Route discovery failed: {}", err);
            process::exit(1);
        }
    };
    for (group, count) in loaded.group_counts() {
        info!("Imported {} routes from {} directory", count, group);
    }
    info!("Route discovery complete: {} routes total", loaded.len());

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cache.cleanup_interval);
    info!("Cache cleanup task started");

    let app = build_app(&config, state, loaded);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // In-flight requests have drained; the sweeper has nothing left to sweep
    cleanup_handle.abort();
    warn!("Cache cleanup task stopped");
    info!("Server shutdown complete");
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
