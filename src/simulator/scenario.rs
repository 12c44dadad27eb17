//! Drop-table scenarios: analytic drop counts turned into seed work items.

use super::config::{DropConfig, DropPool, PlaytimeBucket, RegularDrops};
use crate::catalog::ItemId;
use crate::engine::WorkItem;

/// Which drop table to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Regular and extended-farm drops for a population over some days.
    Daily,
    /// Lifetime guaranteed rares for a single player.
    Lifetime,
}

impl Scenario {
    pub fn seeds(&self, config: &DropConfig) -> Vec<WorkItem> {
        match self {
            Scenario::Daily => daily_seeds(config),
            Scenario::Lifetime => lifetime_seeds(config),
        }
    }

    pub fn description(&self, config: &DropConfig) -> String {
        match self {
            Scenario::Daily => format!(
                "Simulating total drops for {} players playing for {} days...",
                config.daily_players, config.days
            ),
            Scenario::Lifetime => format!(
                "Simulating {} lifetime guaranteed rare drops...",
                config.guaranteed_rare_limit
            ),
        }
    }
}

/// Expected drop counts for the daily scenario, before pool assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotals {
    pub normal_drops: i64,
    pub mission_drops: i64,
    pub marine_drops: i64,
    pub extended_farm_drops: i64,
}

impl DailyTotals {
    /// Computes totals from the playtime distribution.
    ///
    /// Regular drops per bucket follow `config.regular_drops`; extended-farm
    /// drops come every `extended_farm_interval_minutes` with no limit. Half
    /// of regular drops (rounded down) are mission drops, the rest
    /// marine-class drops.
    pub fn from_config(config: &DropConfig) -> Self {
        let total_weight = config.playtime_total_weight();
        if total_weight <= 0 {
            return Self {
                normal_drops: 0,
                mission_drops: 0,
                marine_drops: 0,
                extended_farm_drops: 0,
            };
        }

        let player_days = config.days * config.daily_players;
        let regular: i64 = config
            .playtime
            .iter()
            .map(|b| b.weight * regular_drops(config, b))
            .sum();
        let farm: i64 = config
            .playtime
            .iter()
            .map(|b| {
                b.weight
                    * b.minutes
                        .checked_div(config.extended_farm_interval_minutes)
                        .unwrap_or(0)
            })
            .sum();

        let normal_drops = player_days * regular / total_weight;
        let mission_drops = normal_drops / 2;
        Self {
            normal_drops,
            mission_drops,
            marine_drops: normal_drops - mission_drops,
            extended_farm_drops: player_days * farm / total_weight,
        }
    }
}

fn regular_drops(config: &DropConfig, bucket: &PlaytimeBucket) -> i64 {
    match config.regular_drops {
        RegularDrops::Sheet => bucket.sheet_drops,
        RegularDrops::Interval => bucket
            .minutes
            .checked_div(config.drop_interval_minutes)
            .unwrap_or(0)
            .min(config.daily_drop_limit),
    }
}

/// Splits `total` across `pools` by weight. Whatever integer division drops
/// goes to `remainder_pool`, so the quantities always sum to `total`.
pub fn distribute(total: i64, pools: &[DropPool], remainder_pool: ItemId) -> Vec<WorkItem> {
    let total_weight: i64 = pools.iter().map(|p| p.weight).sum();
    let mut seeds: Vec<WorkItem> = pools
        .iter()
        .map(|p| {
            let share = if total_weight > 0 {
                total * p.weight / total_weight
            } else {
                0
            };
            WorkItem::new(p.item, share)
        })
        .collect();

    for (pool, seed) in pools.iter().zip(&seeds) {
        log::debug!("pool {} ({}): {} drops", pool.item, pool.label, seed.quantity);
    }

    let missed = total - seeds.iter().map(|w| w.quantity).sum::<i64>();
    match seeds.iter_mut().find(|w| w.item == remainder_pool) {
        Some(seed) => seed.quantity += missed,
        None => seeds.push(WorkItem::new(remainder_pool, missed)),
    }
    seeds
}

/// Seeds for the daily scenario: mission pools, marine-class pools, then the
/// extended farm pool.
pub fn daily_seeds(config: &DropConfig) -> Vec<WorkItem> {
    let totals = DailyTotals::from_config(config);
    log::debug!("daily totals: {totals:?}");

    let mut seeds = distribute(
        totals.mission_drops,
        &config.mission_pools,
        config.mission_remainder_pool,
    );
    seeds.extend(distribute(
        totals.marine_drops,
        &config.marine_pools,
        config.marine_remainder_pool,
    ));
    seeds.push(WorkItem::new(
        config.extended_farm_pool,
        totals.extended_farm_drops,
    ));
    seeds
}

/// Seeds for the lifetime guaranteed rare scenario.
pub fn lifetime_seeds(config: &DropConfig) -> Vec<WorkItem> {
    vec![WorkItem::new(
        config.guaranteed_rare_pool,
        config.guaranteed_rare_limit,
    )]
}
