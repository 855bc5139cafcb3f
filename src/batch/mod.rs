//! Request-coalescing batch scheduler in front of the item store.
//!
//! Submissions are grouped per class (`add`, `get`, `update`) and keyed;
//! callers racing on one key share a single outcome. Each class drains on
//! its own timer and runs its entries against the store one at a time.

mod config;
mod error;
mod queue;
mod request;
mod scheduler;

pub use config::{BatchConfig, DEFAULT_MAX_PENDING, MIN_FLUSH_INTERVAL};
pub use error::BatchError;
pub use queue::PendingHandle;
pub use request::{
    read_available, read_selected, read_stats, BatchClass, ItemPage, ReadFn, ReadOutcome,
    UpdateAck, UpdateAction,
};
pub use scheduler::{BatchScheduler, FlushSummary};
