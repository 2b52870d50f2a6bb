//! Expiry Sweep Task
//!
//! Background task that periodically removes aged cache entries. Reads
//! already treat expired entries as absent; the sweep exists so entries
//! nobody asks about again still get released in a long-running process.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::UrlCache;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep takes the cache write lock just long enough
/// to drop aged entries.
///
/// # Arguments
/// * `cache` - Arc<RwLock<UrlCache>> shared reference to the cache
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(
    cache: Arc<RwLock<UrlCache>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and drop aged entries
            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} aged entries", removed);
            } else {
                debug!("Expiry sweep: nothing to remove");
            }
        }
    })
}
