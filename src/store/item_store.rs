use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use chrono::Utc;
use tracing::info;

use super::error::StoreError;
use super::types::{Item, ItemId, PageQuery, StoreStats};

/// In-memory catalog plus the user-curated selected subset.
///
/// The store performs no locking of its own; callers must serialize access
/// (the batch scheduler does this by holding one mutex per executed entry).
///
/// Invariants kept by every method:
/// - the selected ids and the ids appearing in the order sequence are the same set
/// - every selected id exists in the catalog
/// - catalog ids are never reassigned
#[derive(Debug)]
pub struct ItemStore {
    catalog: HashMap<ItemId, Item>,
    /// Catalog ids in order of first insertion.
    insertion: Vec<ItemId>,
    /// Snapshot copies taken at selection time.
    selected: HashMap<ItemId, Item>,
    order: Vec<ItemId>,
    next_id: ItemId,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Empty catalog; auto-assigned ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: HashMap::new(),
            insertion: Vec::new(),
            selected: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Catalog pre-populated with ids `1..=count`. Auto-assigned ids start
    /// right above the seeded range.
    #[must_use]
    pub fn seeded(count: usize) -> Self {
        let started = std::time::Instant::now();
        let created_at = Utc::now();
        let last = ItemId::try_from(count).unwrap_or(ItemId::MAX);

        let mut catalog = HashMap::with_capacity(count);
        let mut insertion = Vec::with_capacity(count);
        for id in 1..=last {
            catalog.insert(id, Item::seeded(id, created_at));
            insertion.push(id);
        }

        info!(
            items = catalog.len(),
            duration_ms = %started.elapsed().as_millis(),
            "Seeded item catalog"
        );

        Self {
            catalog,
            insertion,
            selected: HashMap::new(),
            order: Vec::new(),
            next_id: last.saturating_add(1),
        }
    }

    /// Create a catalog item under `custom_id`, or under the next free id
    /// when none is given.
    pub fn add_item(&mut self, custom_id: Option<ItemId>) -> Result<Item, StoreError> {
        let id = match custom_id {
            Some(id) if self.catalog.contains_key(&id) => return Err(StoreError::DuplicateId(id)),
            Some(id) => id,
            None => self.take_next_id()?,
        };

        let item = Item::created(id);
        self.catalog.insert(id, item.clone());
        self.insertion.push(id);
        Ok(item)
    }

    /// Skips ids already claimed through explicit custom ids.
    fn take_next_id(&mut self) -> Result<ItemId, StoreError> {
        let mut candidate = self.next_id;
        while self.catalog.contains_key(&candidate) {
            candidate = candidate
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted)?;
        }
        self.next_id = candidate.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        Ok(candidate)
    }

    /// Page through unselected catalog items in insertion order.
    ///
    /// Cost grows with `offset + limit` plus the selected or non-matching
    /// items passed over on the way; there is no separate index of
    /// available ids.
    #[must_use]
    pub fn get_available_items(&self, query: &PageQuery) -> Vec<Item> {
        let mut matcher = IdMatcher::new(&query.search);
        self.insertion
            .iter()
            .filter(|&&id| !self.selected.contains_key(&id))
            .filter(|&&id| matcher.matches(id))
            .skip(query.offset)
            .take(query.limit)
            .filter_map(|id| self.catalog.get(id))
            .cloned()
            .collect()
    }

    /// Page through selected items following the user-defined order.
    ///
    /// `offset` is a position in the order sequence, applied before the
    /// search filter.
    #[must_use]
    pub fn get_selected_items(&self, query: &PageQuery) -> Vec<Item> {
        let mut matcher = IdMatcher::new(&query.search);
        self.order
            .iter()
            .skip(query.offset)
            .filter_map(|id| self.selected.get(id))
            .filter(|item| matcher.matches(item.id))
            .take(query.limit)
            .cloned()
            .collect()
    }

    /// Select a catalog item. Selecting an already selected item is a no-op.
    pub fn add_to_selected(&mut self, id: ItemId) -> Result<(), StoreError> {
        let item = self.catalog.get(&id).ok_or(StoreError::ItemNotFound(id))?;
        if !self.selected.contains_key(&id) {
            self.selected.insert(id, item.clone());
            self.order.push(id);
        }
        Ok(())
    }

    /// Deselect an item. Unknown or unselected ids are ignored.
    pub fn remove_from_selected(&mut self, id: ItemId) {
        self.selected.remove(&id);
        self.order.retain(|&selected| selected != id);
    }

    /// Replace the selection order.
    ///
    /// Ids that are not selected are dropped. Caller duplicates are kept
    /// as supplied. Selected ids missing from `new_order` keep their
    /// previous relative order and are appended at the end, so membership
    /// and order never diverge.
    pub fn update_selected_order(&mut self, new_order: &[ItemId]) {
        let mut order: Vec<ItemId> = new_order
            .iter()
            .copied()
            .filter(|id| self.selected.contains_key(id))
            .collect();

        let listed: HashSet<ItemId> = order.iter().copied().collect();
        let omitted: Vec<ItemId> = self
            .order
            .iter()
            .copied()
            .filter(|id| !listed.contains(id))
            .collect();
        order.extend(omitted);

        self.order = order;
    }

    #[must_use]
    pub fn get_stats(&self) -> StoreStats {
        StoreStats {
            total_items: self.catalog.len(),
            selected_count: self.selected.len(),
            next_id: self.next_id,
        }
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.catalog.contains_key(&id)
    }

    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains_key(&id)
    }

    /// Current selection order.
    #[must_use]
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }
}

/// Substring match against the decimal text of an id, reusing one buffer.
struct IdMatcher<'a> {
    search: &'a str,
    buf: String,
}

impl<'a> IdMatcher<'a> {
    fn new(search: &'a str) -> Self {
        Self {
            search,
            buf: String::with_capacity(20),
        }
    }

    fn matches(&mut self, id: ItemId) -> bool {
        if self.search.is_empty() {
            return true;
        }
        self.buf.clear();
        write!(self.buf, "{id}").is_ok() && self.buf.contains(self.search)
    }
}

#[cfg(test)]
#[path = "item_store_tests.rs"]
mod item_store_tests;
