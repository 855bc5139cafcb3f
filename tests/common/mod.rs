//! Common test utilities

use std::sync::Arc;
use std::time::Duration;

use catalog_daemon::batch::{BatchClass, BatchConfig, BatchScheduler, FlushSummary};
use catalog_daemon::server::CatalogDaemonService;
use catalog_daemon::store::ItemStore;

/// Scheduler over a freshly seeded store. Timers are not started; tests
/// drive flushes themselves.
pub fn seeded_scheduler(seed: usize) -> Arc<BatchScheduler> {
    Arc::new(BatchScheduler::new(
        ItemStore::seeded(seed),
        BatchConfig::uniform(Duration::from_secs(1)),
    ))
}

#[allow(dead_code)] // Only the RPC tests need a service
pub fn service(scheduler: &Arc<BatchScheduler>) -> CatalogDaemonService {
    CatalogDaemonService::new(Arc::clone(scheduler))
}

/// Wait until `class` has at least `keys` distinct pending entries, then
/// flush it. Meant to be joined with the futures that submit.
#[allow(dead_code)] // Not every test file awaits handles through join!
pub async fn flush_after(scheduler: &BatchScheduler, class: BatchClass, keys: usize) -> FlushSummary {
    while scheduler.pending(class) < keys {
        tokio::task::yield_now().await;
    }
    scheduler.flush(class).await
}
