//! Item catalog: definitions, schema encodings, and loading.

pub mod encoding;
pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

use crate::error::{DropError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup from item id to definition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    defs: HashMap<ItemId, ItemDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from definitions, rejecting duplicate ids.
    pub fn from_defs(defs: impl IntoIterator<Item = ItemDef>) -> Result<Self> {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def, Path::new("<inline>"))?;
        }
        Ok(catalog)
    }

    pub(crate) fn insert(&mut self, def: ItemDef, source: &Path) -> Result<()> {
        if self.defs.contains_key(&def.id) {
            return Err(DropError::DuplicateItem {
                id: def.id,
                file: source.to_path_buf(),
            });
        }
        self.defs.insert(def.id, def);
        Ok(())
    }

    /// Looks up a definition, failing on ids the catalog does not know.
    pub fn get(&self, id: ItemId) -> Result<&ItemDef> {
        self.defs.get(&id).ok_or(DropError::UnknownItem(id))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.defs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDef> {
        self.defs.values()
    }

    /// Verifies every bundle target and tag generator reference resolves.
    pub fn check_references(&self) -> Result<()> {
        for def in self.defs.values() {
            let targets = def.bundle.iter().map(|entry| entry.item);
            for id in targets.chain(def.tag_generators.iter().copied()) {
                if !self.contains(id) {
                    log::error!("item {} references missing item {}", def.id, id);
                    return Err(DropError::UnknownItem(id));
                }
            }
        }
        Ok(())
    }
}
