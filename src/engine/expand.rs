//! Drop expansion: rewrite generators and bundles until only terminal items remain.

use super::selector::choose_weighted;
use super::tags::TagSet;
use super::work_set::{WorkItem, WorkSet};
use crate::catalog::{Catalog, ItemDef, ItemId, ItemKind, Tag};
use crate::core::constants::DEFAULT_MAX_ROUNDS;
use crate::error::{DropError, Result};
use rand::Rng;

/// Limits for a single expansion.
#[derive(Debug, Clone)]
pub struct ExpandConfig {
    /// Rounds allowed before the catalog is assumed to be cyclic.
    pub max_rounds: usize,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Expands drop tables against a read-only catalog.
///
/// The expander owns no randomness; every call takes the run's random stream
/// explicitly so the same seed reproduces the same drops.
#[derive(Debug, Clone)]
pub struct Expander<'a> {
    catalog: &'a Catalog,
    config: ExpandConfig,
}

impl<'a> Expander<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_config(catalog, ExpandConfig::default())
    }

    pub fn with_config(catalog: &'a Catalog, config: ExpandConfig) -> Self {
        Self { catalog, config }
    }

    /// Reduces `seeds` to a multiset of terminal items.
    ///
    /// Each round rewrites every entry of the current buffer into the next:
    /// terminal items are carried over, bundles grant every content entry
    /// scaled by quantity, generators roll each unit separately. The loop
    /// stops after the first round that expands nothing.
    pub fn expand<R: Rng + ?Sized>(&self, seeds: &[WorkItem], rng: &mut R) -> Result<Vec<WorkItem>> {
        let mut current: Vec<WorkItem> = seeds.iter().filter(|w| w.quantity > 0).cloned().collect();
        let mut next = WorkSet::new();
        let mut round = 0;

        loop {
            if round == self.config.max_rounds {
                return Err(DropError::RoundLimitExceeded { rounds: round });
            }
            round += 1;

            let mut expanded = false;
            for work in current.drain(..) {
                let def = self.catalog.get(work.item)?;
                match &def.kind {
                    kind if kind.is_terminal() => next.insert(work)?,
                    ItemKind::Bundle => {
                        expanded = true;
                        self.expand_bundle(def, &work, &mut next)?;
                    }
                    ItemKind::Generator | ItemKind::PlaytimeGenerator => {
                        expanded = true;
                        self.expand_generator(def, &work, &mut next, rng)?;
                    }
                    kind => {
                        return Err(DropError::UnhandledKind {
                            id: def.id,
                            kind: kind.as_str().to_string(),
                        })
                    }
                }
            }

            log::debug!(
                "round {}: {} entries, {} units",
                round,
                next.len(),
                next.total_quantity()
            );

            next.swap_into(&mut current);
            if !expanded {
                return Ok(current);
            }
        }
    }

    fn expand_bundle(&self, def: &ItemDef, work: &WorkItem, next: &mut WorkSet) -> Result<()> {
        for entry in &def.bundle {
            let quantity = i64::from(entry.quantity)
                .checked_mul(work.quantity)
                .ok_or(DropError::QuantityOverflow { id: def.id })?;
            next.add(entry.item, quantity, work.tags.clone())?;
        }
        Ok(())
    }

    fn expand_generator<R: Rng + ?Sized>(
        &self,
        def: &ItemDef,
        work: &WorkItem,
        next: &mut WorkSet,
        rng: &mut R,
    ) -> Result<()> {
        for _ in 0..work.quantity {
            let (item, tags) = self.roll_unit(def, &work.tags, rng)?;
            next.add(item, 1, tags)?;
        }
        Ok(())
    }

    /// Rolls one generator unit: one tag per tag generator, in list order,
    /// then the content outcome.
    fn roll_unit<R: Rng + ?Sized>(
        &self,
        def: &ItemDef,
        base: &TagSet,
        rng: &mut R,
    ) -> Result<(ItemId, TagSet)> {
        let mut tags = base.clone();
        for &tg_id in &def.tag_generators {
            let tg = self.catalog.get(tg_id)?;
            let choice = choose_weighted(&tg.tag_generator_values, |v| i64::from(v.weight), rng)?;
            tags.push(Tag::new(tg.tag_generator_name.as_str(), choice.value.as_str()));
        }

        let outcome = choose_weighted(&def.bundle, |e| i64::from(e.quantity), rng)?;
        Ok((outcome.item, tags))
    }
}

/// Expands `seeds` with the default round ceiling.
pub fn expand<R: Rng + ?Sized>(
    catalog: &Catalog,
    seeds: &[WorkItem],
    rng: &mut R,
) -> Result<Vec<WorkItem>> {
    Expander::new(catalog).expand(seeds, rng)
}
