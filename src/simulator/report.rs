//! Drop report generation.

use crate::catalog::{Catalog, ItemDef, ItemId, Tag};
use crate::engine::WorkItem;
use crate::error::{DropError, Result};
use serde::Serialize;

/// One rendered line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropLine {
    pub item: ItemId,
    pub quantity: i64,
    pub name: String,
    pub display_type: String,
    /// Static definition tags followed by generated tags, as `key:value`.
    pub tags: Vec<String>,
    /// Whether the entry carries generated tags (rendered with `*`).
    pub unique: bool,
}

impl DropLine {
    pub fn to_text(&self) -> String {
        format!(
            "{}x\t\t#{}{} {} ({})\t\t{}",
            self.quantity,
            self.item,
            if self.unique { "*" } else { "" },
            self.name,
            self.display_type,
            self.tags.join(";")
        )
    }
}

/// Expanded drops, sorted and resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct DropReport {
    pub seed: u64,
    pub total_units: i64,
    pub distinct_entries: usize,
    pub lines: Vec<DropLine>,
}

impl DropReport {
    /// Sorts `items` and resolves names, display types and tags.
    pub fn from_items(catalog: &Catalog, mut items: Vec<WorkItem>, seed: u64) -> Result<Self> {
        sort_items(&mut items);

        let lines = items
            .iter()
            .map(|work| render_line(catalog, work))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            seed,
            total_units: total_units(&items)?,
            distinct_entries: items.len(),
            lines,
        })
    }

    /// Generate a text report, one line per entry.
    pub fn to_text(&self) -> String {
        let mut report = String::new();
        for line in &self.lines {
            report.push_str(&line.to_text());
            report.push('\n');
        }
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sums quantities across entries. Each entry fits in an `i64`, the sum
/// may not.
fn total_units(items: &[WorkItem]) -> Result<i64> {
    items.iter().try_fold(0i64, |total, work| {
        total
            .checked_add(work.quantity)
            .ok_or(DropError::QuantityOverflow { id: work.item })
    })
}

/// Most common first; ties by item id, then by generated tags.
pub fn sort_items(items: &mut [WorkItem]) {
    items.sort_by_cached_key(|w| (std::cmp::Reverse(w.quantity), w.item, tag_sort_key(w)));
}

fn tag_sort_key(work: &WorkItem) -> String {
    work.tags
        .iter()
        .map(|t| format!("{}:{}", t.key, t.value))
        .collect::<Vec<_>>()
        .join(";")
}

fn render_line(catalog: &Catalog, work: &WorkItem) -> Result<DropLine> {
    let def = catalog.get(work.item)?;

    let name = def
        .display_name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("UNNAMED ITEM #{}", work.item));
    let display_type = def
        .display_type_name()
        .unwrap_or("<no display type>")
        .to_string();

    let tags = def
        .tags
        .iter()
        .chain(work.tags.iter())
        .map(|tag| render_tag(catalog, def, tag))
        .collect();

    Ok(DropLine {
        item: work.item,
        quantity: work.quantity,
        name,
        display_type,
        tags,
        unique: !work.tags.is_empty(),
    })
}

/// Renders `key:value`. The accessory tag's value is an item id and shows as
/// that item's name when the catalog has one.
fn render_tag(catalog: &Catalog, def: &ItemDef, tag: &Tag) -> String {
    let accessory = (!def.accessory_tag.is_empty() && def.accessory_tag == tag.key)
        .then(|| tag.value.parse::<ItemId>().ok())
        .flatten()
        .and_then(|id| catalog.get(id).ok())
        .and_then(ItemDef::display_name);

    format!("{}:{}", tag.key, accessory.unwrap_or(&tag.value))
}
