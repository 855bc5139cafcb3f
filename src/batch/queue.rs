use std::collections::HashMap;
use std::future::IntoFuture;

use futures::future::{self, BoxFuture, FutureExt, Shared};
use tokio::sync::oneshot;

use super::error::BatchError;
use super::request::BatchClass;

type Outcome<T> = Result<T, BatchError>;
type SharedOutcome<T> = Shared<BoxFuture<'static, Outcome<T>>>;

/// Pending result of a submission.
///
/// Every submission under the same key before a flush receives a clone of
/// one handle; all clones resolve to the same outcome. Await it directly.
#[derive(Clone)]
pub struct PendingHandle<T: Clone> {
    outcome: SharedOutcome<T>,
}

impl<T> PendingHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn channel() -> (oneshot::Sender<Outcome<T>>, Self) {
        let (sender, receiver) = oneshot::channel();
        let outcome = receiver
            .map(|received| received.unwrap_or(Err(BatchError::Dropped)))
            .boxed()
            .shared();
        (sender, Self { outcome })
    }

    /// Handle that is already rejected.
    fn rejected(err: BatchError) -> Self {
        Self {
            outcome: future::ready(Err(err)).boxed().shared(),
        }
    }

    /// Whether both handles refer to the same pending entry.
    #[must_use]
    pub fn is_shared_with(&self, other: &Self) -> bool {
        self.outcome.ptr_eq(&other.outcome)
    }
}

impl<T> IntoFuture for PendingHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Outcome<T>;
    type IntoFuture = SharedOutcome<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.outcome
    }
}

/// An entry taken out of a pending table by a flush.
pub(crate) struct PendingEntry<P, T> {
    pub key: String,
    pub payload: P,
    pub sender: oneshot::Sender<Outcome<T>>,
}

/// Keyed pending submissions for one class, in insertion order.
pub(crate) struct PendingTable<P, T: Clone> {
    class: BatchClass,
    entries: Vec<PendingEntry<P, T>>,
    handles: HashMap<String, PendingHandle<T>>,
}

impl<P, T> PendingTable<P, T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(class: BatchClass) -> Self {
        Self {
            class,
            entries: Vec::new(),
            handles: HashMap::new(),
        }
    }

    /// Attach to the entry pending under `key`, or queue a new one.
    ///
    /// The payload of a submission that attaches to an existing entry is
    /// discarded. New keys beyond `limit` are rejected at once.
    pub fn submit(&mut self, key: String, payload: P, limit: Option<usize>) -> PendingHandle<T> {
        if let Some(handle) = self.handles.get(&key) {
            return handle.clone();
        }

        if let Some(limit) = limit {
            if self.entries.len() >= limit {
                return PendingHandle::rejected(BatchError::QueueFull {
                    class: self.class,
                    limit,
                });
            }
        }

        let (sender, handle) = PendingHandle::channel();
        self.handles.insert(key.clone(), handle.clone());
        self.entries.push(PendingEntry {
            key,
            payload,
            sender,
        });
        handle
    }

    /// Take every pending entry, leaving the table empty for the next cycle.
    pub fn drain(&mut self) -> Vec<PendingEntry<P, T>> {
        self.handles.clear();
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_key_shares_handle() {
        let mut table: PendingTable<u8, u32> = PendingTable::new(BatchClass::Get);
        let first = table.submit("k".to_string(), 1, None);
        let second = table.submit("k".to_string(), 2, None);
        assert!(first.is_shared_with(&second));
        assert_eq!(table.len(), 1);

        let entries = table.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].payload, 1);

        for entry in entries {
            entry.sender.send(Ok(7)).unwrap();
        }
        assert_eq!(first.await, Ok(7));
        assert_eq!(second.await, Ok(7));
    }

    #[test]
    fn test_distinct_keys_get_distinct_handles() {
        let mut table: PendingTable<(), u32> = PendingTable::new(BatchClass::Add);
        let a = table.submit("a".to_string(), (), None);
        let b = table.submit("b".to_string(), (), None);
        assert!(!a.is_shared_with(&b));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_drain_preserves_insertion_order_and_resets_keys() {
        let mut table: PendingTable<u8, u32> = PendingTable::new(BatchClass::Update);
        for (i, key) in ["c", "a", "b"].iter().enumerate() {
            table.submit((*key).to_string(), u8::try_from(i).unwrap(), None);
        }
        let keys: Vec<String> = table.drain().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
        assert_eq!(table.len(), 0);

        let again = table.submit("c".to_string(), 9, None);
        let entries = table.drain();
        assert_eq!(entries[0].payload, 9);
        drop(again);
    }

    #[tokio::test]
    async fn test_limit_rejects_new_keys_but_not_existing() {
        let mut table: PendingTable<(), u32> = PendingTable::new(BatchClass::Get);
        let first = table.submit("a".to_string(), (), Some(1));
        let attached = table.submit("a".to_string(), (), Some(1));
        assert!(first.is_shared_with(&attached));

        let rejected = table.submit("b".to_string(), (), Some(1));
        assert_eq!(
            rejected.await,
            Err(BatchError::QueueFull {
                class: BatchClass::Get,
                limit: 1
            })
        );
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_sender_resolves_to_dropped() {
        let mut table: PendingTable<(), u32> = PendingTable::new(BatchClass::Add);
        let handle = table.submit("a".to_string(), (), None);
        drop(table.drain());
        assert_eq!(handle.await, Err(BatchError::Dropped));
    }
}
