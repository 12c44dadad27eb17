//! Dropsim command line
//!
//! Loads `item-schema-*.json` from a directory, expands a drop scenario and
//! prints the resulting items, most common first.
//!
//! Usage:
//!   dropsim [OPTIONS] <daily|lifetime>

use clap::{Parser, ValueEnum};
use dropsim::catalog::load_catalog;
use dropsim::core::constants::{DEFAULT_MAX_ROUNDS, DEFAULT_SEED};
use dropsim::simulator::{run_simulation, DropConfig, RegularDrops, Scenario};
use dropsim::ExpandConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    /// Regular and extended-farm drops for a player population
    Daily,
    /// Lifetime guaranteed rare drops
    Lifetime,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Daily => Scenario::Daily,
            ScenarioArg::Lifetime => Scenario::Lifetime,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DropCounting {
    /// Per-bucket counts from the balancing sheet
    Sheet,
    /// One drop per 15 minutes, capped at the daily limit
    Interval,
}

impl From<DropCounting> for RegularDrops {
    fn from(arg: DropCounting) -> Self {
        match arg {
            DropCounting::Sheet => RegularDrops::Sheet,
            DropCounting::Interval => RegularDrops::Interval,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "dropsim")]
#[command(about = "Simulate loot drop tables against an item schema")]
struct Cli {
    /// Scenario to simulate
    #[arg(value_enum, default_value = "daily")]
    scenario: ScenarioArg,

    /// Directory holding item-schema-*.json files
    #[arg(long, default_value = ".")]
    schema_dir: PathBuf,

    /// RNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Days to simulate (daily scenario)
    #[arg(long)]
    days: Option<i64>,

    /// Players per day (daily scenario)
    #[arg(long)]
    players: Option<i64>,

    /// How regular daily drops are counted (daily scenario)
    #[arg(long, value_enum, default_value = "sheet")]
    drop_counting: DropCounting,

    /// Expansion rounds before giving up on a cyclic schema
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = DropConfig::default()
        .with_seed(cli.seed)
        .with_regular_drops(cli.drop_counting.into());
    if let Some(days) = cli.days {
        config.days = days;
    }
    if let Some(players) = cli.players {
        config.daily_players = players;
    }
    let scenario = Scenario::from(cli.scenario);

    let catalog = match load_catalog(&cli.schema_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading schema from {}: {}", cli.schema_dir.display(), e);
            std::process::exit(1);
        }
    };

    let expand_config = ExpandConfig {
        max_rounds: cli.max_rounds,
    };
    let report = match run_simulation(&catalog, scenario, &config, expand_config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    match cli.format {
        Format::Text => {
            println!("{}\n", scenario.description(&config));
            print!("{}", report.to_text());
        }
        Format::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error writing JSON: {}", e);
                std::process::exit(1);
            }
        },
    }
}
