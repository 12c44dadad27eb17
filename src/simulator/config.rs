//! Simulation configuration.

use crate::catalog::ItemId;
use crate::core::constants::DEFAULT_SEED;

/// Share of players whose session lasts `minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaytimeBucket {
    pub minutes: i64,
    pub weight: i64,
    /// Regular drops credited to this bucket by the balancing sheet.
    pub sheet_drops: i64,
}

impl PlaytimeBucket {
    pub const fn new(minutes: i64, weight: i64, sheet_drops: i64) -> Self {
        Self {
            minutes,
            weight,
            sheet_drops,
        }
    }
}

/// How regular drops per playtime bucket are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegularDrops {
    /// Each bucket's `sheet_drops`. The default table reproduces the
    /// balancing sheet's `5T - 4w15 + 3w30 - 2w45 - w60` weighted drops.
    #[default]
    Sheet,
    /// One drop per `drop_interval_minutes`, capped at `daily_drop_limit`.
    Interval,
}

/// A drop pool item and how often it is chosen relative to its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPool {
    pub item: ItemId,
    pub label: &'static str,
    pub weight: i64,
}

impl DropPool {
    const fn new(item: ItemId, label: &'static str, weight: i64) -> Self {
        Self {
            item,
            label,
            weight,
        }
    }
}

/// Configuration for a drop simulation.
#[derive(Debug, Clone)]
pub struct DropConfig {
    /// Random seed for reproducibility
    pub seed: u64,

    /// Days of play to simulate
    pub days: i64,

    /// Players logging in each day
    pub daily_players: i64,

    /// Distribution of daily session length
    pub playtime: Vec<PlaytimeBucket>,

    /// Counting rule for regular drops
    pub regular_drops: RegularDrops,

    /// Minutes of play per regular drop
    pub drop_interval_minutes: i64,

    /// Regular drops allowed per day
    pub daily_drop_limit: i64,

    /// Minutes of play per extended-farm drop (no daily limit)
    pub extended_farm_interval_minutes: i64,

    /// Pools for the mission half of regular drops
    pub mission_pools: Vec<DropPool>,

    /// Pools for the marine-class half of regular drops
    pub marine_pools: Vec<DropPool>,

    /// Receives the mission drops lost to integer rounding
    pub mission_remainder_pool: ItemId,

    /// Receives the marine drops lost to integer rounding
    pub marine_remainder_pool: ItemId,

    pub extended_farm_pool: ItemId,

    /// Guaranteed rare pool (after 100 hours, max once per 90 days)
    pub guaranteed_rare_pool: ItemId,

    /// Lifetime cap on guaranteed rare drops
    pub guaranteed_rare_limit: i64,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            days: 30,
            daily_players: 5000,
            // The sheet credits the 30 minute bucket with 8 drops
            playtime: vec![
                PlaytimeBucket::new(15, 10, 1),
                PlaytimeBucket::new(30, 100, 8),
                PlaytimeBucket::new(45, 150, 3),
                PlaytimeBucket::new(60, 150, 4),
                PlaytimeBucket::new(75, 10, 5),
                PlaytimeBucket::new(90, 5, 5),
                PlaytimeBucket::new(180, 1, 5),
                PlaytimeBucket::new(270, 1, 5),
                PlaytimeBucket::new(360, 1, 5),
                PlaytimeBucket::new(450, 1, 5),
            ],
            regular_drops: RegularDrops::Sheet,
            drop_interval_minutes: 15,
            daily_drop_limit: 5,
            extended_farm_interval_minutes: 90,
            mission_pools: vec![
                DropPool::new(7000, "Fallback", 0),
                DropPool::new(7001, "Workshop Competition", 1),
                DropPool::new(7002, "Workshop Campaign A", 1),
                DropPool::new(7003, "Workshop Campaign B", 1),
                DropPool::new(7004, "Workshop Bonus A", 1),
                DropPool::new(7005, "Workshop Bonus B", 1),
                DropPool::new(7006, "Standalone Official Missions", 10),
                DropPool::new(7007, "Endless", 1),
                DropPool::new(7008, "Deathmatch", 1),
                DropPool::new(7009, "Jacob's Rest", 100),
                DropPool::new(7010, "Area 9800", 10),
                DropPool::new(7011, "Operation Cleansweep", 10),
                DropPool::new(7012, "Research 7", 10),
                DropPool::new(7013, "Tears for Tarnor", 10),
                DropPool::new(7014, "Tilarus-5", 10),
                DropPool::new(7015, "Lana's Escape", 10),
                DropPool::new(7016, "Paranoia", 10),
                DropPool::new(7017, "Nam Humanum", 10),
                DropPool::new(7018, "BioGen Corporation", 10),
                DropPool::new(7019, "Accident 32", 40),
                DropPool::new(7020, "Adanaxis", 40),
            ],
            marine_pools: vec![
                DropPool::new(7025, "Marine Class Officer", 5),
                DropPool::new(7026, "Marine Class Special Weapons", 5),
                DropPool::new(7027, "Marine Class Medic", 6),
                DropPool::new(7028, "Marine Class Tech", 8),
            ],
            mission_remainder_pool: 7000,
            marine_remainder_pool: 7026,
            extended_farm_pool: 7029,
            guaranteed_rare_pool: 7021,
            guaranteed_rare_limit: 5,
        }
    }
}

impl DropConfig {
    /// Quick config for a smaller population, used for fast balance checks
    pub fn small_population(days: i64, daily_players: i64) -> Self {
        Self {
            days,
            daily_players,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_regular_drops(mut self, regular_drops: RegularDrops) -> Self {
        self.regular_drops = regular_drops;
        self
    }

    /// Sum of all playtime bucket weights.
    pub fn playtime_total_weight(&self) -> i64 {
        self.playtime.iter().map(|b| b.weight).sum()
    }
}
