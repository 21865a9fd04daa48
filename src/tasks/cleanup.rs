//! TTL Cleanup Task
//!
//! Background task that periodically removes expired response cache entries.
//!
//! Expired entries are already invisible to readers; this sweep exists so
//! memory is reclaimed even for keys nothing ever asks for again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::state::SharedCache;

/// Spawns a background task that periodically evicts expired cache entries.
///
/// The task loops forever, sleeping between sweeps; each sweep briefly takes
/// the store's write lock.
///
/// # Arguments
/// * `cache` - Shared response cache, the same handle the middleware uses
/// * `cleanup_interval_secs` - Seconds between sweeps
///
/// # Returns
/// The task's JoinHandle; aborting it stops the sweep during shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Cache cleanup task running every {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: nothing expired");
            }
        }
    })
}
