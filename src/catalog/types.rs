use super::encoding;
use crate::core::constants::{GAME_SPECIFIC_FIELDS, LOCALIZED_FIELD_PREFIXES, SCHEMA_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog identifier, always within (0, 1_000_000_000).
pub type ItemId = u32;

/// What the engine does with an item when it meets one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Plain item; never expanded.
    #[default]
    Item,
    /// Tool that applies tags; expands like a plain item.
    TagTool,
    /// Picks one content outcome per unit.
    Generator,
    /// Generator granted by playtime; same expansion as `Generator`.
    PlaytimeGenerator,
    /// Grants every content entry, scaled by quantity.
    Bundle,
    /// Describes a weighted tag; only referenced, never expanded.
    TagGenerator,
    /// Any type string the schema carries that we do not know.
    Unknown(String),
}

impl ItemKind {
    /// Returns the schema spelling of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Item => "item",
            ItemKind::TagTool => "tag_tool",
            ItemKind::Generator => "generator",
            ItemKind::PlaytimeGenerator => "playtimegenerator",
            ItemKind::Bundle => "bundle",
            ItemKind::TagGenerator => "tag_generator",
            ItemKind::Unknown(s) => s,
        }
    }

    /// Terminal kinds pass through expansion unchanged.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemKind::Item | ItemKind::TagTool)
    }
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "item" => ItemKind::Item,
            "tag_tool" => ItemKind::TagTool,
            "generator" => ItemKind::Generator,
            "playtimegenerator" => ItemKind::PlaytimeGenerator,
            "bundle" => ItemKind::Bundle,
            "tag_generator" => ItemKind::TagGenerator,
            _ => ItemKind::Unknown(s),
        }
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(ItemKind::from)
    }
}

impl Serialize for ItemKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A `key:value` pair, either static on a definition or generated per unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One candidate value of a tag generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueWeight {
    pub value: String,
    pub weight: i32,
}

/// One content entry of a bundle or generator.
///
/// For bundles `quantity` is a literal multiplicity; for generators it is
/// the selection weight of `item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleEntry {
    pub item: ItemId,
    pub quantity: i32,
}

/// A `RRGGBB` schema color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A single item definition from an `item-schema-*.json` file.
///
/// Localized names and descriptions other than English are kept as raw text
/// in `extra`; anything else not listed here is rejected by the loader.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDef {
    #[serde(rename = "itemdefid", deserialize_with = "encoding::de_item_id")]
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_english: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_type: String,
    #[serde(default)]
    pub display_type_english: String,

    #[serde(default)]
    pub icon_url: String,
    #[serde(default, deserialize_with = "encoding::de_opt_hex_color")]
    pub name_color: Option<HexColor>,
    #[serde(default, deserialize_with = "encoding::de_opt_hex_color")]
    pub background_color: Option<HexColor>,
    #[serde(default)]
    pub tradable: bool,
    #[serde(default)]
    pub marketable: bool,
    #[serde(default)]
    pub auto_stack: bool,

    #[serde(default)]
    pub drop_interval: i32,
    #[serde(default)]
    pub use_drop_window: Option<bool>,
    #[serde(default)]
    pub drop_window: i32,
    #[serde(default)]
    pub use_drop_limit: Option<bool>,
    #[serde(default)]
    pub drop_limit: i32,

    #[serde(default, deserialize_with = "encoding::de_list")]
    pub bundle: Vec<BundleEntry>,
    #[serde(default, deserialize_with = "encoding::de_list")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "encoding::de_list")]
    pub allowed_tags_from_tools: Vec<Tag>,
    #[serde(default)]
    pub accessory_tag: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default, deserialize_with = "encoding::de_id_list")]
    pub tag_generators: Vec<ItemId>,
    #[serde(default)]
    pub tag_generator_name: String,
    #[serde(default, deserialize_with = "encoding::de_list")]
    pub tag_generator_values: Vec<ValueWeight>,

    #[serde(default)]
    pub item_slot: String,
    #[serde(default, deserialize_with = "encoding::de_string_list")]
    pub compressed_dynamic_props: Vec<String>,

    /// Localized text and game-specific extras, keyed by schema field name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ItemDef {
    pub fn new(id: ItemId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            ..Default::default()
        }
    }

    /// A plain item that expansion leaves alone.
    pub fn terminal(id: ItemId) -> Self {
        Self::new(id, ItemKind::Item)
    }

    /// A bundle granting `quantity` of each `(item, quantity)` entry.
    pub fn bundle(id: ItemId, contents: &[(ItemId, i32)]) -> Self {
        Self {
            bundle: to_entries(contents),
            ..Self::new(id, ItemKind::Bundle)
        }
    }

    /// A generator picking one `(item, weight)` entry per unit.
    pub fn generator(id: ItemId, outcomes: &[(ItemId, i32)]) -> Self {
        Self {
            bundle: to_entries(outcomes),
            ..Self::new(id, ItemKind::Generator)
        }
    }

    /// A tag generator emitting `name:value`, weighted by `values`.
    pub fn tag_generator(id: ItemId, name: &str, values: &[(&str, i32)]) -> Self {
        Self {
            tag_generator_name: name.to_string(),
            tag_generator_values: values
                .iter()
                .map(|&(value, weight)| ValueWeight {
                    value: value.to_string(),
                    weight,
                })
                .collect(),
            ..Self::new(id, ItemKind::TagGenerator)
        }
    }

    pub fn with_tag_generators(mut self, ids: &[ItemId]) -> Self {
        self.tag_generators = ids.to_vec();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// English name, falling back to the default name.
    pub fn display_name(&self) -> Option<&str> {
        first_non_empty(&self.name_english, &self.name)
    }

    /// English display type, falling back to the default display type.
    pub fn display_type_name(&self) -> Option<&str> {
        first_non_empty(&self.display_type_english, &self.display_type)
    }

    /// First key in `extra` that is neither localized text nor a known
    /// game-specific field.
    pub fn unknown_field(&self) -> Option<&str> {
        self.extra
            .keys()
            .map(String::as_str)
            .find(|key| !is_extra_field(key))
    }
}

fn is_extra_field(key: &str) -> bool {
    if GAME_SPECIFIC_FIELDS.contains(&key) {
        return true;
    }
    LOCALIZED_FIELD_PREFIXES.iter().any(|prefix| {
        key.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|language| SCHEMA_LANGUAGES.contains(&language))
    })
}

fn to_entries(pairs: &[(ItemId, i32)]) -> Vec<BundleEntry> {
    pairs
        .iter()
        .map(|&(item, quantity)| BundleEntry { item, quantity })
        .collect()
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> Option<&'a str> {
    [preferred, fallback].into_iter().find(|s| !s.is_empty())
}
