use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::config::BatchConfig;
use super::error::BatchError;
use super::queue::{PendingEntry, PendingHandle, PendingTable};
use super::request::{BatchClass, ReadFn, ReadOutcome, UpdateAck, UpdateAction};
use crate::store::{Item, ItemId, ItemStore};

/// Entries handled by one flush of one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Owns the item store and the three pending tables.
///
/// Submissions only touch a pending table and never the store. Flushes take
/// the store lock once per entry, so store calls from concurrently firing
/// class timers are serialized.
pub struct BatchScheduler {
    store: Mutex<ItemStore>,
    config: BatchConfig,
    add: StdMutex<PendingTable<Option<ItemId>, Item>>,
    get: StdMutex<PendingTable<ReadFn, ReadOutcome>>,
    update: StdMutex<PendingTable<UpdateAction, UpdateAck>>,
}

/// Pending tables hold no invariant a panic could break mid-update.
fn lock_table<P, T: Clone>(table: &StdMutex<PendingTable<P, T>>) -> MutexGuard<'_, PendingTable<P, T>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BatchScheduler {
    #[must_use]
    pub fn new(store: ItemStore, config: BatchConfig) -> Self {
        Self {
            store: Mutex::new(store),
            config,
            add: StdMutex::new(PendingTable::new(BatchClass::Add)),
            get: StdMutex::new(PendingTable::new(BatchClass::Get)),
            update: StdMutex::new(PendingTable::new(BatchClass::Update)),
        }
    }

    /// Queue creation of an item; resolves to the created item.
    pub fn submit_add(&self, key: impl Into<String>, custom_id: Option<ItemId>) -> PendingHandle<Item> {
        lock_table(&self.add).submit(key.into(), custom_id, self.config.max_pending)
    }

    /// Queue a read; resolves to whatever `read` returns at flush time.
    pub fn submit_get(&self, key: impl Into<String>, read: ReadFn) -> PendingHandle<ReadOutcome> {
        lock_table(&self.get).submit(key.into(), read, self.config.max_pending)
    }

    /// Queue a selection change; resolves to an acknowledgment.
    pub fn submit_update(
        &self,
        key: impl Into<String>,
        action: UpdateAction,
    ) -> PendingHandle<UpdateAck> {
        lock_table(&self.update).submit(key.into(), action, self.config.max_pending)
    }

    /// Number of distinct keys waiting for the next flush of `class`.
    #[must_use]
    pub fn pending(&self, class: BatchClass) -> usize {
        match class {
            BatchClass::Add => lock_table(&self.add).len(),
            BatchClass::Get => lock_table(&self.get).len(),
            BatchClass::Update => lock_table(&self.update).len(),
        }
    }

    /// Drain `class` and run every drained entry against the store.
    ///
    /// Submissions arriving while this runs land in the next cycle. A
    /// failing entry rejects only its own handle.
    pub async fn flush(&self, class: BatchClass) -> FlushSummary {
        match class {
            BatchClass::Add => {
                let entries = lock_table(&self.add).drain();
                self.run(class, entries, |store, custom_id| {
                    store.add_item(custom_id).map_err(BatchError::from)
                })
                .await
            }
            BatchClass::Get => {
                let entries = lock_table(&self.get).drain();
                self.run(class, entries, |store, read| {
                    read(store).map_err(BatchError::from)
                })
                .await
            }
            BatchClass::Update => {
                let entries = lock_table(&self.update).drain();
                self.run(class, entries, |store, action| {
                    action.apply(store).map_err(BatchError::from)
                })
                .await
            }
        }
    }

    async fn run<P, T, F>(
        &self,
        class: BatchClass,
        entries: Vec<PendingEntry<P, T>>,
        mut apply: F,
    ) -> FlushSummary
    where
        F: FnMut(&mut ItemStore, P) -> Result<T, BatchError>,
    {
        let mut summary = FlushSummary::default();
        if entries.is_empty() {
            return summary;
        }

        info!(class = %class, entries = entries.len(), "Processing batch");

        for PendingEntry {
            key,
            payload,
            sender,
        } in entries
        {
            let outcome = {
                let mut store = self.store.lock().await;
                catch_unwind(AssertUnwindSafe(|| apply(&mut *store, payload))).unwrap_or_else(|_| {
                    Err(BatchError::internal(format!(
                        "{class} request '{key}' panicked"
                    )))
                })
            };

            summary.processed = summary.processed.saturating_add(1);
            if let Err(e) = &outcome {
                summary.failed = summary.failed.saturating_add(1);
                debug!(class = %class, key = %key, error = %e, "Batch entry failed");
            }

            if sender.send(outcome).is_err() {
                debug!(class = %class, key = %key, "No caller left waiting for batch entry");
            }
        }

        info!(
            class = %class,
            processed = summary.processed,
            failed = summary.failed,
            "Batch processed"
        );
        summary
    }

    /// Start one flush timer per class.
    ///
    /// Each timer stops when `shutdown` turns `true` (or its sender goes
    /// away) and flushes its class one last time so no accepted submission
    /// is left unresolved.
    pub fn spawn_timers(self: &Arc<Self>, shutdown: &watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        BatchClass::ALL
            .iter()
            .map(|&class| {
                let scheduler = Arc::clone(self);
                let mut shutdown = shutdown.clone();
                tokio::spawn(async move {
                    let period = scheduler.config.interval(class);
                    let mut ticker = interval(period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    // The first tick completes immediately
                    ticker.tick().await;

                    debug!(class = %class, period_ms = %period.as_millis(), "Flush timer started");

                    loop {
                        tokio::select! {
                            _ = ticker.tick() => {
                                scheduler.flush(class).await;
                            }
                            changed = shutdown.changed() => {
                                if changed.is_err() || *shutdown.borrow() {
                                    break;
                                }
                            }
                        }
                    }

                    let summary = scheduler.flush(class).await;
                    if summary.failed > 0 {
                        warn!(class = %class, failed = summary.failed, "Final flush had failures");
                    }
                    debug!(class = %class, "Flush timer stopped");
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
