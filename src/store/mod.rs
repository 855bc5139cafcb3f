//! Volatile in-memory item catalog with an ordered selected subset.

mod error;
mod item_store;
mod types;

pub use error::StoreError;
pub use item_store::ItemStore;
pub use types::{Item, ItemId, PageQuery, StoreStats, DEFAULT_PAGE_LIMIT};
