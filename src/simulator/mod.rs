//! Drop-table simulator for balancing analysis.
//!
//! Turns a scenario's analytic drop counts into seed work items, expands them
//! against the catalog with a seeded random stream, and renders the result.

mod config;
mod report;
mod scenario;

pub use config::{DropConfig, DropPool, PlaytimeBucket, RegularDrops};
pub use report::{sort_items, DropLine, DropReport};
pub use scenario::{daily_seeds, distribute, lifetime_seeds, DailyTotals, Scenario};

use crate::catalog::Catalog;
use crate::engine::{ExpandConfig, Expander};
use crate::error::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Runs one simulation: seeds the scenario, expands it, and builds the report.
///
/// Each call owns a fresh stream seeded from `config.seed`, so identical
/// inputs give identical reports.
pub fn run_simulation(
    catalog: &Catalog,
    scenario: Scenario,
    config: &DropConfig,
    expand_config: ExpandConfig,
) -> Result<DropReport> {
    let seeds = scenario.seeds(config);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let items = Expander::with_config(catalog, expand_config).expand(&seeds, &mut rng)?;
    log::info!(
        "{} seed entries expanded into {} distinct drops",
        seeds.len(),
        items.len()
    );

    DropReport::from_items(catalog, items, config.seed)
}
