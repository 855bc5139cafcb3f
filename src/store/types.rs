use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog identifier. Unique and never reassigned once handed out.
pub type ItemId = i64;

/// Default page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Item produced by the bulk seed at startup.
    #[must_use]
    pub fn seeded(id: ItemId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: format!("Element {id}"),
            created_at,
        }
    }

    /// Item produced by an explicit creation request.
    #[must_use]
    pub fn created(id: ItemId) -> Self {
        Self {
            id,
            name: format!("Custom Element {id}"),
            created_at: Utc::now(),
        }
    }
}

/// Paging window plus substring filter over the decimal form of item ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageQuery {
    pub offset: usize,
    pub limit: usize,
    /// Empty matches everything.
    pub search: String,
}

impl PageQuery {
    #[must_use]
    pub fn new(offset: usize, limit: usize, search: impl Into<String>) -> Self {
        Self {
            offset,
            limit,
            search: search.into(),
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
            search: String::new(),
        }
    }
}

/// Point-in-time counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_items: usize,
    pub selected_count: usize,
    pub next_id: ItemId,
}

impl StoreStats {
    /// Items that are in the catalog but not selected.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.total_items.saturating_sub(self.selected_count)
    }
}
