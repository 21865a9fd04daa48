//! Cache Entry Module
//!
//! One stored response payload plus the timing data that bounds its life.

use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

// == Cache Entry ==
/// A single cached response body with its timing metadata.
///
/// The value is the body exactly as the handler emitted it, so a replay is
/// byte-for-byte identical to the original response.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Captured response body
    pub value: Bytes,
    /// When the entry was stored (Unix milliseconds)
    pub created_at: u64,
    /// Deadline after which the entry counts as absent; `None` never expires
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Wraps a captured body, stamping it with its expiry deadline.
    ///
    /// # Arguments
    /// * `value` - Body bytes to store
    /// * `ttl_ms` - Lifetime in milliseconds, `None` for no deadline
    pub fn new(value: Bytes, ttl_ms: Option<u64>) -> Self {
        let now = now_ms();
        let expires_at = ttl_ms.map(|ttl| now + ttl);

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Whether the entry's deadline has passed.
    ///
    /// The deadline itself counts as expired: an entry whose TTL has fully
    /// elapsed is absent immediately, not one read later.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => now_ms() >= expires,
            None => false,
        }
    }

    // == Refresh ==
    /// Resets the entry's age, restarting its TTL from now.
    ///
    /// Only called when reads are configured to refresh entry age.
    pub fn refresh(&mut self, ttl_ms: Option<u64>) {
        let now = now_ms();
        self.created_at = now;
        self.expires_at = ttl_ms.map(|ttl| now + ttl);
    }
}

// == Clock ==
/// Milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
