//! Route Loader Module
//!
//! Walks the route-definition tree at startup, derives a descriptor per file,
//! pairs it with its registered handler and produces the route table.
//!
//! Discovery is deliberately forgiving: a missing root, an unreadable
//! subdirectory, a malformed file name or a file without a registered handler
//! is a logged warning and the walk continues. The single fatal outcome is a
//! `(method, path)` collision, which would otherwise be resolved by silent
//! overwrite at request time.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::IntoResponse,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use tracing::{debug, error, warn};

use super::{HandlerRegistry, HttpMethod, RouteDescriptor, RouteHandler, ROUTE_FILE_EXTENSION};
use crate::error::LoadError;
use crate::state::AppState;

// == Route Loader ==
/// Startup-time route discovery over an on-disk tree.
pub struct RouteLoader<'a> {
    registry: &'a HandlerRegistry,
}

impl<'a> RouteLoader<'a> {
    // == Constructor ==
    /// Creates a loader backed by a handler registry.
    pub fn new(registry: &'a HandlerRegistry) -> Self {
        Self { registry }
    }

    // == Load ==
    /// Recursively discovers route files under `root`.
    ///
    /// Runs once, sequentially, before the server accepts connections.
    ///
    /// # Returns
    /// - `Ok(LoadedRoutes)` with everything that could be discovered
    /// - `Err(LoadError::RouteCollision)` when two files resolve to the same
    ///   `(method, path)` pair
    pub fn load(&self, root: &Path) -> Result<LoadedRoutes, LoadError> {
        let mut loaded = LoadedRoutes::default();
        let mut seen = HashSet::new();

        if !root.is_dir() {
            warn!(
                "Routes directory {} not found, starting with no API routes",
                root.display()
            );
            return Ok(loaded);
        }

        self.walk(root, "", &mut loaded, &mut seen)?;
        Ok(loaded)
    }

    // == Walk ==
    fn walk(
        &self,
        dir: &Path,
        base_path: &str,
        loaded: &mut LoadedRoutes,
        seen: &mut HashSet<(HttpMethod, String)>,
    ) -> Result<(), LoadError> {
        let reader = match fs::read_dir(dir) {
            Ok(reader) => reader,
            Err(err) => {
                // One unreadable subtree never takes down its siblings
                warn!(
                    "Skipping unreadable route directory {}: {}",
                    dir.display(),
                    err
                );
                return Ok(());
            }
        };

        // Sort entries so registration order is deterministic across platforms
        let mut entries: Vec<fs::DirEntry> = Vec::new();
        for entry in reader {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                }
            }
        }
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!("Skipping {}: {}", path.display(), err);
                    continue;
                }
            };

            if file_type.is_dir() {
                let name = entry.file_name().to_string_lossy().into_owned();
                // Base paths are always joined with `/`, never the host separator
                let child_base = if base_path.is_empty() {
                    name
                } else {
                    format!("{base_path}/{name}")
                };
                self.walk(&path, &child_base, loaded, seen)?;
            } else if file_type.is_file() {
                self.load_file(&path, base_path, loaded, seen)?;
            }
        }

        Ok(())
    }

    // == Load File ==
    fn load_file(
        &self,
        path: &Path,
        base_path: &str,
        loaded: &mut LoadedRoutes,
        seen: &mut HashSet<(HttpMethod, String)>,
    ) -> Result<(), LoadError> {
        // Only files carrying the route extension participate in the convention
        if path.extension().and_then(|e| e.to_str()) != Some(ROUTE_FILE_EXTENSION) {
            return Ok(());
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => {
                warn!("Skipping route file with non-UTF-8 name: {}", path.display());
                return Ok(());
            }
        };

        let descriptor = match RouteDescriptor::from_stem(stem, base_path) {
            Some(descriptor) => descriptor,
            None => {
                warn!(
                    "Skipping route file with unrecognized method token: {}",
                    path.display()
                );
                return Ok(());
            }
        };

        let registry_key = if base_path.is_empty() {
            stem.to_string()
        } else {
            format!("{base_path}/{stem}")
        };
        let handler = match self.registry.get(&registry_key) {
            Some(handler) => handler,
            None => {
                warn!(
                    "No handler registered for route file {} (key {}), skipping",
                    path.display(),
                    registry_key
                );
                return Ok(());
            }
        };

        if !seen.insert((descriptor.method, descriptor.canonical_path.clone())) {
            return Err(LoadError::RouteCollision {
                method: descriptor.method,
                path: descriptor.canonical_path,
            });
        }

        debug!(
            "Discovered route {} {} from {}",
            descriptor.method,
            descriptor.canonical_path,
            path.display()
        );
        loaded.push(descriptor, handler);
        Ok(())
    }
}

// == Loaded Routes ==
/// Outcome of a discovery walk: routes ready to register plus the per-group
/// tally used for startup reporting.
#[derive(Default)]
pub struct LoadedRoutes {
    routes: Vec<DiscoveredRoute>,
    group_counts: BTreeMap<String, usize>,
}

struct DiscoveredRoute {
    descriptor: RouteDescriptor,
    handler: RouteHandler,
}

impl LoadedRoutes {
    fn push(&mut self, descriptor: RouteDescriptor, handler: RouteHandler) {
        *self
            .group_counts
            .entry(descriptor.group().to_string())
            .or_insert(0) += 1;
        self.routes.push(DiscoveredRoute {
            descriptor,
            handler,
        });
    }

    // == Length ==
    /// Number of discovered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    // == Group Counts ==
    /// Route counts per top-level group under `/api`.
    pub fn group_counts(&self) -> &BTreeMap<String, usize> {
        &self.group_counts
    }

    // == Apply ==
    /// Registers every discovered route on the router.
    ///
    /// Collisions were rejected during discovery, so the per-path merge below
    /// only ever combines different methods on the same path.
    pub fn apply(self, mut router: Router<AppState>) -> Router<AppState> {
        for DiscoveredRoute {
            descriptor,
            handler,
        } in self.routes
        {
            let method_router = wrap_handler(&descriptor, handler);
            router = router.route(&descriptor.canonical_path, method_router);
        }
        router
    }
}

// == Handler Wrapping ==
/// Adapts a registered handler into a routed axum handler with error
/// containment.
///
/// A handler `Err` never propagates to the router: client-class errors map to
/// their status and message, internal errors are logged with the route path
/// and surface as a generic 500 body.
fn wrap_handler(descriptor: &RouteDescriptor, handler: RouteHandler) -> MethodRouter<AppState> {
    let route_path = descriptor.canonical_path.clone();

    let wrapped = move |State(state): State<AppState>, req: Request| {
        let handler = Arc::clone(&handler);
        let route_path = route_path.clone();
        async move {
            match handler(state, req).await {
                Ok(response) => response,
                Err(err) => {
                    if err.is_internal() {
                        error!("Handler for {} failed: {}", route_path, err);
                    } else {
                        debug!("Handler for {} rejected request: {}", route_path, err);
                    }
                    err.into_response()
                }
            }
        }
    };

    on(method_filter(descriptor.method), wrapped)
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Delete => MethodFilter::DELETE,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Options => MethodFilter::OPTIONS,
        HttpMethod::Head => MethodFilter::HEAD,
    }
}
