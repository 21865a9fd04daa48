//! Convention-driven web backend with filesystem route discovery
//!
//! API routes are declared as files under a routes tree; file names carry
//! the HTTP method and URL segments. Responses for logged-in users flow
//! through a bounded per-user cache with TTL expiration and LRU eviction.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod routing;
pub mod server;
pub mod session;
pub mod state;
pub mod tasks;
pub mod users;

pub use config::Config;
pub use state::AppState;
pub use tasks::spawn_cleanup_task;
