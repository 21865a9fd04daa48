//! Cache Statistics Module
//!
//! Tracks response cache metrics: hits, misses, evictions and the store's
//! configured bounds.

use serde::Serialize;

// == Cache Stats ==
/// Response cache metrics snapshot.
///
/// The counters accumulate over the store's lifetime; `size`, `max_capacity`
/// and `ttl_ms` are filled in when a snapshot is taken.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests answered from the cache
    pub hits: u64,
    /// Requests that fell through to the handler (absent or expired)
    pub misses: u64,
    /// Entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of entries in the store
    pub size: usize,
    /// Configured capacity bound
    pub max_capacity: usize,
    /// Configured time-to-live in milliseconds
    pub ttl_ms: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Zeroed counters, empty snapshot fields.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of lookups answered from the cache, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recorders ==
    /// Counts a lookup answered from the store.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a lookup that found nothing usable.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts an entry pushed out by the capacity bound.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
