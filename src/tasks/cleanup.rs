//! TTL Cleanup Task
//!
//! Background task that periodically removes expired records from the
//! in-memory store. Redis expires keys on its own and needs no sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::mock::MemoryStore;

/// Spawns a background task that periodically drops expired mock records.
///
/// Reads already skip expired entries; the sweep only bounds memory use for
/// records nobody asks for again.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(MemoryStore::new());
/// let cleanup_handle = spawn_cleanup_task(store.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(store: Arc<MemoryStore>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    spawn_cleanup_every(store, Duration::from_secs(cleanup_interval_secs))
}

fn spawn_cleanup_every(store: Arc<MemoryStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.cleanup_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired records", removed);
            } else {
                debug!("TTL cleanup: no expired records found");
            }
        }
    })
}
