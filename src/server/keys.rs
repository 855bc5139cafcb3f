//! Coalescing keys. Requests that build the same key before a flush share
//! one outcome.
//!
//! A repeated select (or deselect) of one id joins the first entry for that
//! key, even when an opposite change was queued in between. Select 2,
//! deselect 2, select 2 in one window applies select then deselect, reports
//! success to all three callers, and leaves 2 unselected.

use crate::store::{ItemId, PageQuery};

pub const REORDER_KEY: &str = "reorder";
pub const STATS_KEY: &str = "stats";

#[must_use]
pub fn available(query: &PageQuery) -> String {
    format!("available_{}_{}_{}", query.offset, query.limit, query.search)
}

#[must_use]
pub fn selected(query: &PageQuery) -> String {
    format!("selected_{}_{}_{}", query.offset, query.limit, query.search)
}

/// Explicit ids coalesce on the id; auto-assigned creations never coalesce.
#[must_use]
pub fn create(custom_id: Option<ItemId>) -> String {
    match custom_id {
        Some(id) => id.to_string(),
        None => format!("auto_{}", uuid::Uuid::new_v4()),
    }
}

#[must_use]
pub fn select(id: ItemId) -> String {
    format!("select_{id}")
}

#[must_use]
pub fn deselect(id: ItemId) -> String {
    format!("deselect_{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_key_format() {
        assert_eq!(available(&PageQuery::new(0, 20, "")), "available_0_20_");
        assert_eq!(available(&PageQuery::new(40, 20, "7")), "available_40_20_7");
    }

    #[test]
    fn test_create_keys() {
        assert_eq!(create(Some(15)), "15");
        assert_ne!(create(None), create(None));
    }

    #[test]
    fn test_select_and_deselect_do_not_collide() {
        assert_ne!(select(3), deselect(3));
    }
}
