//! Cache Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so idle
//! keys do not linger until their next read.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheManager;

/// Spawns a background task that sweeps expired entries from `cache`.
///
/// The task sleeps for `interval_secs` between runs and takes the write
/// lock only for the sweep itself. Abort the returned handle to stop it.
pub fn spawn_sweep_task<V>(cache: Arc<RwLock<CacheManager<V>>>, interval_secs: u64) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting cache expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = cache.write().await;
                guard.purge_expired()
            };

            if removed > 0 {
                info!(removed, "expiry sweep removed cache entries");
            } else {
                debug!("expiry sweep found nothing to remove");
            }
        }
    })
}
