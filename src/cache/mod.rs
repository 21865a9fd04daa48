//! Cache Module
//!
//! Identity-partitioned response caching with TTL expiration and LRU
//! eviction, plus the middleware that wires it into the request path.

mod entry;
mod key;
mod lru;
mod middleware;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{derive_key, parse_query, take_refresh_flag, QueryMap, NO_CACHE_FLAG};
pub use lru::LruTracker;
pub use middleware::response_cache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Largest response body the middleware will store, in bytes
pub const MAX_CACHEABLE_BODY: usize = 1024 * 1024; // 1 MB
