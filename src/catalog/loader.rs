//! Loading `item-schema-*.json` files into a [`Catalog`].

use super::types::ItemDef;
use super::Catalog;
use crate::core::constants::{SCHEMA_FILE_PREFIX, SCHEMA_FILE_SUFFIX};
use crate::error::{DropError, Result};
use serde::Deserialize;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Top-level layout of one schema file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub appid: i64,
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub translator_note: String,
}

/// Lists the schema files in `dir`, sorted by path so load order is stable.
pub fn schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_schema = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(SCHEMA_FILE_PREFIX) && n.ends_with(SCHEMA_FILE_SUFFIX));
        if is_schema && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads every schema file in `dir` into one catalog.
///
/// Duplicate ids across files are an error. References are checked once
/// everything is loaded.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    let files = schema_files(dir)?;

    for path in &files {
        let file = fs::File::open(path)?;
        let schema: SchemaFile = serde_json::from_reader(BufReader::new(file))?;
        log::debug!(
            "{}: appid {} with {} items",
            path.display(),
            schema.appid,
            schema.items.len()
        );
        add_schema(&mut catalog, schema, path)?;
    }

    catalog.check_references()?;
    log::info!(
        "loaded {} item definitions from {} schema files",
        catalog.len(),
        files.len()
    );
    Ok(catalog)
}

/// Parses a single schema document held in memory.
pub fn parse_schema(json: &str) -> Result<Catalog> {
    let schema: SchemaFile = serde_json::from_str(json)?;
    let mut catalog = Catalog::new();
    add_schema(&mut catalog, schema, Path::new("<inline>"))?;
    catalog.check_references()?;
    Ok(catalog)
}

/// Adds one file's items, rejecting item fields the schema does not define.
fn add_schema(catalog: &mut Catalog, schema: SchemaFile, source: &Path) -> Result<()> {
    for def in schema.items {
        if let Some(field) = def.unknown_field() {
            return Err(DropError::UnknownField {
                id: def.id,
                field: field.to_string(),
                file: source.to_path_buf(),
            });
        }
        catalog.insert(def, source)?;
    }
    Ok(())
}
