//! Routing Module
//!
//! Discovers API routes from an on-disk file tree and registers them with the
//! router. File names carry the HTTP method and endpoint segments; handlers
//! come from a statically typed registry.

mod descriptor;
mod filename;
mod loader;
mod path;
mod registry;


// Re-export public types
pub use descriptor::RouteDescriptor;
pub use filename::{parse_filename, HttpMethod, ParsedFilename};
pub use loader::{LoadedRoutes, RouteLoader};
pub use path::normalize_route_path;
pub use registry::{HandlerFuture, HandlerRegistry, RouteHandler};

// == Public Constants ==
/// Extension a file must carry to be treated as a route definition
pub const ROUTE_FILE_EXTENSION: &str = "route";

/// URL prefix every discovered route is mounted under
pub const API_PREFIX: &str = "/api";
