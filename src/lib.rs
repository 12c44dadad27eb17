//! Dropsim - loot drop table simulator
//!
//! Expands weighted drop tables (generators, bundles, tag generators) from an
//! item schema into the concrete items a population of players would receive.

pub mod catalog;
pub mod core;
pub mod engine;
pub mod error;
pub mod simulator;

pub use catalog::{Catalog, ItemDef, ItemId, ItemKind, Tag};
pub use engine::{expand, ExpandConfig, Expander, TagSet, WorkItem};
pub use error::{DropError, Result};
