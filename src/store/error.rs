//! Error types for item store operations.

use thiserror::Error;

use super::types::ItemId;

/// Failures raised synchronously by the item store. A failed call leaves the
/// store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Item with ID {0} already exists")]
    DuplicateId(ItemId),

    #[error("Item with ID {0} not found")]
    ItemNotFound(ItemId),

    #[error("No identifiers left to assign")]
    IdsExhausted,
}
