//! LRU Tracker Module
//!
//! Tracks key usage order for least-recently-used eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Usage order of cache keys.
///
/// Front = most recently used, back = least recently used. Entries move to
/// the front when inserted or replaced; reads only move them when the store
/// is configured to refresh recency on read.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Keys ordered by most recent use
    order: VecDeque<String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// An existing occurrence is removed first, so a key appears at most once.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Returns and removes the least recently used key.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    #[allow(dead_code)]
    pub fn peek_lru(&self) -> Option<&String> {
        self.order.back()
    }

    // == Clear ==
    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
