//! Error types for batched requests.

use thiserror::Error;

use super::request::BatchClass;
use crate::store::StoreError;

/// Why a submitted request was rejected.
///
/// Cloneable because every caller sharing a coalescing key receives the
/// same outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("The {class} queue is full ({limit} pending requests)")]
    QueueFull { class: BatchClass, limit: usize },

    #[error("Batch scheduler stopped before the request was processed")]
    Dropped,

    #[error("Internal failure: {0}")]
    Internal(String),
}

impl BatchError {
    pub fn internal(msg: impl Into<String>) -> Self {
        BatchError::Internal(msg.into())
    }
}
