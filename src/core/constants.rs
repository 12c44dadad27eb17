// Item ids
pub const MIN_ITEM_ID: i64 = 1;
pub const MAX_ITEM_ID_EXCLUSIVE: i64 = 1_000_000_000;

// Expansion
pub const DEFAULT_MAX_ROUNDS: usize = 1_000;
pub const DEFAULT_SEED: u64 = 0;

// Compact schema encodings
pub const LIST_SEPARATOR: char = ';';
pub const KEY_VALUE_SEPARATOR: char = ':';
pub const BUNDLE_QUANTITY_SEPARATOR: char = 'x';

// Schema files
pub const SCHEMA_FILE_PREFIX: &str = "item-schema-";
pub const SCHEMA_FILE_SUFFIX: &str = ".json";

// Localized schema fields: `<prefix>_<language>`
pub const SCHEMA_LANGUAGES: &[&str] = &[
    "brazilian", "czech", "danish", "dutch", "english", "finnish", "french", "german",
    "hungarian", "italian", "japanese", "koreana", "norwegian", "polish", "portuguese",
    "romanian", "russian", "schinese", "spanish", "swedish", "tchinese", "thai", "turkish",
    "ukrainian",
];
pub const LOCALIZED_FIELD_PREFIXES: &[&str] =
    &["name", "description", "display_type", "accessory_description"];

// Game-specific item fields that are accepted but not interpreted
pub const GAME_SPECIFIC_FIELDS: &[&str] =
    &["translator_note", "after_description", "accessory_description"];
