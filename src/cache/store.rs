//! Cache Store Module
//!
//! Bounded response store combining HashMap storage with LRU tracking and
//! TTL expiration.

use std::collections::HashMap;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::config::CacheConfig;

// == Cache Store ==
/// Capacity- and age-bounded key-value store for response payloads.
///
/// A miss is a normal outcome here, not an error: `get` answers with
/// `Option`, and callers fall through to the handler on `None`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU usage tracker
    lru: LruTracker,
    /// Lifetime hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entry time-to-live in milliseconds, 0 = entries never expire
    ttl_ms: u64,
    /// Release an expired entry once on read instead of dropping it unseen
    allow_stale: bool,
    /// Reads refresh an entry's age and recency
    update_age_on_get: bool,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// Stale release and age-refresh-on-read start disabled, matching the
    /// default policy.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the store can hold
    /// * `ttl_ms` - Entry time-to-live in milliseconds (0 disables expiry)
    pub fn new(max_entries: usize, ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_ms,
            allow_stale: false,
            update_age_on_get: false,
        }
    }

    /// Creates a CacheStore from configuration, including the read-policy
    /// flags.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            allow_stale: config.allow_stale,
            update_age_on_get: config.update_age_on_get,
            ..Self::new(config.max_entries, config.ttl_ms)
        }
    }

    // == Get ==
    /// Retrieves a stored payload.
    ///
    /// Expired entries are treated as absent and removed; with stale release
    /// enabled, an expired value is returned exactly once while still being
    /// removed. By default a read does not refresh the entry's age or
    /// recency.
    ///
    /// # Arguments
    /// * `key` - The derived cache key
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            let stale = self.entries.remove(key).map(|entry| entry.value);
            self.lru.remove(key);

            if self.allow_stale {
                // One last serving on the way out
                self.stats.record_hit();
                return stale;
            }
            self.stats.record_miss();
            return None;
        }

        let value = entry.value.clone();
        if self.update_age_on_get {
            let ttl = effective_ttl(self.ttl_ms);
            entry.refresh(ttl);
            self.lru.touch(key);
        }
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Inserts or replaces a payload.
    ///
    /// Replacing resets the entry's TTL. Inserting a new key at capacity
    /// first evicts the least recently used entry.
    ///
    /// # Arguments
    /// * `key` - The derived cache key
    /// * `value` - The response body to store
    pub fn set(&mut self, key: String, value: Bytes) {
        if self.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.pop_lru() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        let entry = CacheEntry::new(value, effective_ttl(self.ttl_ms));
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
    }

    // == Delete ==
    /// Explicitly invalidates a key.
    ///
    /// # Returns
    /// `true` when an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Empties the whole store. Lifetime counters keep accumulating.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Stats ==
    /// Returns a statistics snapshot, no side effects.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            max_capacity: self.max_entries,
            ttl_ms: self.ttl_ms,
            ..self.stats.clone()
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
        }
        count
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps the configured TTL to the per-entry form, where 0 means "never".
fn effective_ttl(ttl_ms: u64) -> Option<u64> {
    if ttl_ms == 0 {
        None
    } else {
        Some(ttl_ms)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn body(text: &str) -> Bytes {
        Bytes::copy_from_slice(text.as_bytes())
    }

    #[test]
    fn test_store_starts_empty() {
        let store = CacheStore::new(100, 30_000);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100, 30_000);

        store.set("k1".to_string(), body("v1"));
        assert_eq!(store.get("k1"), Some(body("v1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing_is_none() {
        let mut store = CacheStore::new(100, 30_000);
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100, 30_000);

        store.set("k1".to_string(), body("v1"));
        store.set("k1".to_string(), body("v2"));

        assert_eq!(store.get("k1"), Some(body("v2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new(100, 30_000);

        store.set("k1".to_string(), body("v1"));
        assert!(store.delete("k1"));
        assert!(!store.delete("k1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(100, 30_000);

        store.set("k1".to_string(), body("v1"));
        store.set("k2".to_string(), body("v2"));
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("k1"), None);
    }

    #[test]
    fn test_store_expired_entry_reads_as_absent() {
        let mut store = CacheStore::new(100, 100);

        store.set("k1".to_string(), body("v1"));
        assert!(store.get("k1").is_some());

        sleep(Duration::from_millis(150));

        // Expired entries are absent and physically removed
        assert_eq!(store.get("k1"), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_zero_ttl_never_expires() {
        let mut store = CacheStore::new(100, 0);

        store.set("k1".to_string(), body("v1"));
        sleep(Duration::from_millis(50));
        assert!(store.get("k1").is_some());
    }

    #[test]
    fn test_store_allow_stale_releases_once() {
        let config = CacheConfig {
            max_entries: 100,
            ttl_ms: 100,
            allow_stale: true,
            ..CacheConfig::default()
        };
        let mut store = CacheStore::from_config(&config);

        store.set("k1".to_string(), body("v1"));
        sleep(Duration::from_millis(150));

        // First read after expiry releases the stale value
        assert_eq!(store.get("k1"), Some(body("v1")));
        // Second read finds nothing
        assert_eq!(store.get("k1"), None);
    }

    #[test]
    fn test_store_lru_eviction_at_capacity() {
        let mut store = CacheStore::new(3, 30_000);

        store.set("k1".to_string(), body("v1"));
        store.set("k2".to_string(), body("v2"));
        store.set("k3".to_string(), body("v3"));

        // Exactly one eviction, and it takes the least recently used key
        store.set("k4".to_string(), body("v4"));

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("k1"), None);
        assert!(store.get("k2").is_some());
        assert!(store.get("k3").is_some());
        assert!(store.get("k4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_get_does_not_refresh_recency_by_default() {
        let mut store = CacheStore::new(3, 30_000);

        store.set("k1".to_string(), body("v1"));
        store.set("k2".to_string(), body("v2"));
        store.set("k3".to_string(), body("v3"));

        // Reads leave the usage order untouched under the default policy
        store.get("k1");
        store.set("k4".to_string(), body("v4"));

        assert_eq!(store.get("k1"), None);
        assert!(store.get("k2").is_some());
    }

    #[test]
    fn test_store_update_age_on_get_refreshes_recency() {
        let config = CacheConfig {
            max_entries: 3,
            ttl_ms: 30_000,
            update_age_on_get: true,
            ..CacheConfig::default()
        };
        let mut store = CacheStore::from_config(&config);

        store.set("k1".to_string(), body("v1"));
        store.set("k2".to_string(), body("v2"));
        store.set("k3".to_string(), body("v3"));

        // Reading k1 makes it most recently used, so k2 is evicted next
        store.get("k1");
        store.set("k4".to_string(), body("v4"));

        assert!(store.get("k1").is_some());
        assert_eq!(store.get("k2"), None);
    }

    #[test]
    fn test_store_replace_resets_ttl() {
        let mut store = CacheStore::new(100, 200);

        store.set("k1".to_string(), body("v1"));
        sleep(Duration::from_millis(120));

        // Replacement restarts the clock
        store.set("k1".to_string(), body("v2"));
        sleep(Duration::from_millis(120));

        assert_eq!(store.get("k1"), Some(body("v2")));
    }

    #[test]
    fn test_store_stats_snapshot() {
        let mut store = CacheStore::new(500, 1_800_000);

        store.set("k1".to_string(), body("v1"));
        store.get("k1");
        store.get("missing");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.max_capacity, 500);
        assert_eq!(stats.ttl_ms, 1_800_000);
    }

    #[test]
    fn test_store_cleanup_reclaims_expired() {
        let mut store = CacheStore::new(100, 100);

        store.set("k1".to_string(), body("v1"));
        store.set("k2".to_string(), body("v2"));
        sleep(Duration::from_millis(150));
        store.set("k3".to_string(), body("v3"));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.get("k3").is_some());
    }

    #[test]
    fn test_store_zero_capacity_stores_nothing() {
        let mut store = CacheStore::new(0, 30_000);

        store.set("k1".to_string(), body("v1"));
        assert!(store.is_empty());
        assert_eq!(store.get("k1"), None);
    }
}
