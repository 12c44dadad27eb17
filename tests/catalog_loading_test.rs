//! Integration test: schema files on disk -> Catalog -> expansion

use dropsim::catalog::{load_catalog, schema_files, ItemKind};
use dropsim::engine::{expand, WorkItem};
use dropsim::DropError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POOLS: &str = r#"{
    "appid": 563560,
    "items": [
        {
            "itemdefid": 7021,
            "type": "playtimegenerator",
            "name": "Random Drop Pool Guaranteed Rare",
            "bundle": "100x3;101x1",
            "tag_generators": "900"
        },
        {
            "itemdefid": 900,
            "type": "tag_generator",
            "tag_generator_name": "style",
            "tag_generator_values": "classic:4;neon"
        }
    ]
}"#;

const ITEMS: &str = r#"{
    "appid": 563560,
    "items": [
        { "itemdefid": 100, "type": "item", "name_english": "Officer Hat" },
        { "itemdefid": 101, "type": "item", "name_english": "Medic Gloves", "display_type": "Gloves" }
    ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write schema fixture");
}

#[test]
fn test_loads_all_schema_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "item-schema-pools.json", POOLS);
    write(dir.path(), "item-schema-items.json", ITEMS);

    let catalog = load_catalog(dir.path()).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.get(7021).unwrap().kind, ItemKind::PlaytimeGenerator);
    assert_eq!(catalog.get(101).unwrap().display_type, "Gloves");
}

#[test]
fn test_other_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "item-schema-items.json", ITEMS);
    write(dir.path(), "notes.json", "not json at all");
    write(dir.path(), "item-schema-backup.json.bak", "{}");

    let files = schema_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(load_catalog(dir.path()).unwrap().len(), 2);
}

#[test]
fn test_schema_files_sorted() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "item-schema-b.json", r#"{"items": []}"#);
    write(dir.path(), "item-schema-a.json", r#"{"items": []}"#);

    let names: Vec<_> = schema_files(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["item-schema-a.json", "item-schema-b.json"]);
}

#[test]
fn test_duplicate_ids_across_files_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "item-schema-a.json", ITEMS);
    write(dir.path(), "item-schema-b.json", ITEMS);

    match load_catalog(dir.path()) {
        Err(DropError::DuplicateItem { id, file }) => {
            assert_eq!(id, 100);
            assert!(file.ends_with("item-schema-b.json"));
        }
        other => panic!("expected DuplicateItem, got {other:?}"),
    }
}

#[test]
fn test_missing_reference_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    // Pools reference items 100/101 which are not present
    write(dir.path(), "item-schema-pools.json", POOLS);

    assert!(matches!(
        load_catalog(dir.path()),
        Err(DropError::UnknownItem(100))
    ) || matches!(
        load_catalog(dir.path()),
        Err(DropError::UnknownItem(101))
    ));
}

#[test]
fn test_malformed_encoding_is_json_error() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "item-schema-bad.json",
        r#"{"items": [{"itemdefid": 5, "type": "bundle", "bundle": "6x0"}]}"#,
    );

    let err = load_catalog(dir.path()).unwrap_err();
    assert!(matches!(err, DropError::Json(_)));
    assert!(!err.is_configuration_error());
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(load_catalog(&missing), Err(DropError::Io(_))));
}

#[test]
fn test_loaded_catalog_expands() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "item-schema-pools.json", POOLS);
    write(dir.path(), "item-schema-items.json", ITEMS);
    let catalog = load_catalog(dir.path()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = expand(&catalog, &[WorkItem::new(7021, 5)], &mut rng).unwrap();

    assert_eq!(result.iter().map(|w| w.quantity).sum::<i64>(), 5);
    for work in &result {
        assert!(work.item == 100 || work.item == 101);
        assert_eq!(work.tags.len(), 1);
        let tag = work.tags.iter().next().unwrap();
        assert_eq!(tag.key, "style");
        assert!(tag.value == "classic" || tag.value == "neon");
    }
}

#[test]
fn test_misspelled_item_field_names_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "item-schema-typo.json",
        r#"{"items": [{"itemdefid": 100, "type": "item", "name_german": "Hut", "tradeable": true}]}"#,
    );

    match load_catalog(dir.path()) {
        Err(DropError::UnknownField { id, field, file }) => {
            assert_eq!(id, 100);
            assert_eq!(field, "tradeable");
            assert!(file.ends_with("item-schema-typo.json"));
        }
        other => panic!("expected UnknownField, got {other:?}"),
    }
}
