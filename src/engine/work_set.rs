//! Work items and the merge-on-insert multiset that holds them.

use super::tags::TagSet;
use crate::catalog::ItemId;
use crate::error::{DropError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// `quantity` units of `item`, all carrying exactly `tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    pub item: ItemId,
    pub quantity: i64,
    pub tags: TagSet,
}

impl WorkItem {
    pub fn new(item: ItemId, quantity: i64) -> Self {
        Self {
            item,
            quantity,
            tags: TagSet::new(),
        }
    }

    pub fn with_tags(item: ItemId, quantity: i64, tags: TagSet) -> Self {
        Self {
            item,
            quantity,
            tags,
        }
    }
}

/// Ordered multiset of work items with no two entries sharing
/// (item, tag set).
///
/// Entries keep first-insertion order. Lookup goes through a hash index over
/// the item id and the order-independent tag set, so inserting is constant
/// time rather than a scan of the whole set.
#[derive(Debug, Clone, Default)]
pub struct WorkSet {
    items: Vec<WorkItem>,
    index: HashMap<(ItemId, TagSet), usize>,
}

impl WorkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `item` with `tags`, merging into an existing
    /// entry when one matches. Non-positive quantities are ignored.
    pub fn add(&mut self, item: ItemId, quantity: i64, tags: TagSet) -> Result<()> {
        if quantity <= 0 {
            return Ok(());
        }

        let key = (item, tags);
        if let Some(&i) = self.index.get(&key) {
            let entry = &mut self.items[i];
            entry.quantity = entry
                .quantity
                .checked_add(quantity)
                .ok_or(DropError::QuantityOverflow { id: item })?;
            return Ok(());
        }

        let (item, tags) = key;
        self.index.insert((item, tags.clone()), self.items.len());
        self.items.push(WorkItem {
            item,
            quantity,
            tags,
        });
        Ok(())
    }

    pub fn insert(&mut self, work: WorkItem) -> Result<()> {
        self.add(work.item, work.quantity, work.tags)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all entries, widened so large sets cannot overflow.
    pub fn total_quantity(&self) -> i128 {
        self.items.iter().map(|w| i128::from(w.quantity)).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[WorkItem] {
        &self.items
    }

    /// Swaps this set's entries into `buf` and empties the set.
    ///
    /// `buf` must be empty; its allocation is reused for the next round.
    pub fn swap_into(&mut self, buf: &mut Vec<WorkItem>) {
        debug_assert!(buf.is_empty());
        std::mem::swap(&mut self.items, buf);
        self.index.clear();
    }
}

impl<'a> IntoIterator for &'a WorkSet {
    type Item = &'a WorkItem;
    type IntoIter = std::slice::Iter<'a, WorkItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
