//! Request validation done before anything is submitted to the scheduler.

use thiserror::Error;

use crate::server::proto::ReorderSelectedRequest;
use crate::store::{ItemId, PageQuery, DEFAULT_PAGE_LIMIT};

/// Largest page a single list request may ask for.
pub const MAX_PAGE_LIMIT: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
}

/// Build a page query from wire values. A zero limit means the default page
/// size; oversized limits are clamped.
#[must_use]
pub fn page_query(offset: u32, limit: u32, search: &str) -> PageQuery {
    let limit = match usize::try_from(limit).unwrap_or(MAX_PAGE_LIMIT) {
        0 => DEFAULT_PAGE_LIMIT,
        n => n.min(MAX_PAGE_LIMIT),
    };
    PageQuery::new(usize::try_from(offset).unwrap_or(usize::MAX), limit, search)
}

/// The reorder payload must carry an order list, even an empty one.
pub fn reorder_ids(req: ReorderSelectedRequest) -> Result<Vec<ItemId>, RequestError> {
    req.order
        .map(|order| order.ids)
        .ok_or_else(|| RequestError::InvalidOrder("order must be a list of item ids".to_string()))
}
