use std::fmt;

use serde::Serialize;

use crate::store::{Item, ItemId, ItemStore, PageQuery, StoreError, StoreStats};

/// Independent request queue with its own cadence and handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchClass {
    Add,
    Get,
    Update,
}

impl BatchClass {
    pub const ALL: [BatchClass; 3] = [BatchClass::Add, BatchClass::Get, BatchClass::Update];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BatchClass::Add => "add",
            BatchClass::Get => "get",
            BatchClass::Update => "update",
        }
    }
}

impl fmt::Display for BatchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutation carried by an `update` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    Select(ItemId),
    Deselect(ItemId),
    Reorder(Vec<ItemId>),
}

impl UpdateAction {
    pub(crate) fn apply(&self, store: &mut ItemStore) -> Result<UpdateAck, StoreError> {
        match self {
            UpdateAction::Select(id) => store.add_to_selected(*id)?,
            UpdateAction::Deselect(id) => store.remove_from_selected(*id),
            UpdateAction::Reorder(ids) => store.update_selected_order(ids),
        }
        Ok(UpdateAck)
    }
}

/// Acknowledgment for a completed `update` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateAck;

/// One page of items plus the size of the listing it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: usize,
}

/// Value produced by a `get` entry's read callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "data")]
pub enum ReadOutcome {
    Page(ItemPage),
    Stats(StoreStats),
}

/// Read callback embedded in a `get` submission. Runs inside a flush with
/// shared access to the store.
pub type ReadFn = Box<dyn FnOnce(&ItemStore) -> Result<ReadOutcome, StoreError> + Send>;

/// Available items for `query`; the total counts every unselected item.
#[must_use]
pub fn read_available(query: PageQuery) -> ReadFn {
    Box::new(move |store| {
        Ok(ReadOutcome::Page(ItemPage {
            items: store.get_available_items(&query),
            total: store.get_stats().available_count(),
        }))
    })
}

/// Selected items for `query` in selection order.
#[must_use]
pub fn read_selected(query: PageQuery) -> ReadFn {
    Box::new(move |store| {
        Ok(ReadOutcome::Page(ItemPage {
            items: store.get_selected_items(&query),
            total: store.get_stats().selected_count,
        }))
    })
}

#[must_use]
pub fn read_stats() -> ReadFn {
    Box::new(|store| Ok(ReadOutcome::Stats(store.get_stats())))
}
