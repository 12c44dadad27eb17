//! Compact text encodings used inside schema string fields.
//!
//! Lists are `;`-separated. Entries are `key:value` (tags), `value:weight`
//! (tag generator values), `idxqty` (bundle contents) or bare ids. An empty
//! field decodes to an empty list.

use super::types::{BundleEntry, HexColor, ItemId, Tag, ValueWeight};
use crate::core::constants::{
    BUNDLE_QUANTITY_SEPARATOR, KEY_VALUE_SEPARATOR, LIST_SEPARATOR, MAX_ITEM_ID_EXCLUSIVE,
    MIN_ITEM_ID,
};
use crate::error::{DropError, Result};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

impl FromStr for Tag {
    type Err = DropError;

    fn from_str(s: &str) -> Result<Self> {
        match split_suffix(s, KEY_VALUE_SEPARATOR, "tag", "expected string after ':'")? {
            (key, Some(value)) => Ok(Tag::new(key, value)),
            (key, None) => Ok(Tag::new(key, "")),
        }
    }
}

impl FromStr for ValueWeight {
    type Err = DropError;

    fn from_str(s: &str) -> Result<Self> {
        let (value, weight) =
            split_suffix(s, KEY_VALUE_SEPARATOR, "value weight", "expected number after ':'")?;
        let weight = match weight {
            Some(w) => parse_positive(w, "value weight")?,
            None => 1,
        };
        Ok(ValueWeight {
            value: value.to_string(),
            weight,
        })
    }
}

impl FromStr for BundleEntry {
    type Err = DropError;

    fn from_str(s: &str) -> Result<Self> {
        let (item, quantity) = match s.split_once(BUNDLE_QUANTITY_SEPARATOR) {
            Some((item, quantity)) => (item, parse_positive(quantity, "bundle quantity")?),
            None => (s, 1),
        };
        Ok(BundleEntry {
            item: parse_item_id(item)?,
            quantity,
        })
    }
}

impl FromStr for HexColor {
    type Err = DropError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DropError::encoding("hex color", s, "expected RRGGBB"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|e| DropError::encoding("hex color", s, e.to_string()))
        };
        Ok(HexColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Splits `s` at the first `sep`. A separator with nothing after it is an error,
/// as is an empty entry.
fn split_suffix<'a>(
    s: &'a str,
    sep: char,
    field: &'static str,
    reason: &str,
) -> Result<(&'a str, Option<&'a str>)> {
    if s.is_empty() {
        return Err(DropError::encoding(field, s, "empty entry"));
    }
    match s.split_once(sep) {
        Some((_, "")) => Err(DropError::encoding(field, s, reason)),
        Some((head, tail)) => Ok((head, Some(tail))),
        None => Ok((s, None)),
    }
}

fn parse_positive(s: &str, field: &'static str) -> Result<i32> {
    let n: i32 = s
        .parse()
        .map_err(|e: std::num::ParseIntError| DropError::encoding(field, s, e.to_string()))?;
    if n <= 0 {
        return Err(DropError::encoding(field, s, format!("must be positive, got {n}")));
    }
    Ok(n)
}

/// Parses and range-checks a single item id.
pub fn parse_item_id(s: &str) -> Result<ItemId> {
    let n: i64 = s
        .parse()
        .map_err(|e: std::num::ParseIntError| DropError::encoding("item id", s, e.to_string()))?;
    check_item_id(n)
}

/// Accepts ids in (0, 1_000_000_000).
pub fn check_item_id(n: i64) -> Result<ItemId> {
    if !(MIN_ITEM_ID..MAX_ITEM_ID_EXCLUSIVE).contains(&n) {
        return Err(DropError::InvalidItemId(n));
    }
    Ok(n as ItemId)
}

/// Decodes a `;`-separated list of `T`. The empty string is the empty list.
pub fn parse_list<T: FromStr<Err = DropError>>(s: &str) -> Result<Vec<T>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(LIST_SEPARATOR).map(str::parse).collect()
}

/// Decodes a `;`-separated list of item ids.
pub fn parse_id_list(s: &str) -> Result<Vec<ItemId>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(LIST_SEPARATOR).map(parse_item_id).collect()
}

/// Decodes a plain `;`-separated string list.
pub fn parse_string_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(LIST_SEPARATOR).map(str::to_string).collect()
}

// serde adapters for `ItemDef` fields

pub(crate) fn de_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = DropError>,
{
    let s = String::deserialize(deserializer)?;
    parse_list(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn de_id_list<'de, D>(deserializer: D) -> std::result::Result<Vec<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_id_list(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn de_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_string_list(&s))
}

pub(crate) fn de_item_id<'de, D>(deserializer: D) -> std::result::Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    let n = i64::deserialize(deserializer)?;
    check_item_id(n).map_err(serde::de::Error::custom)
}

pub(crate) fn de_opt_hex_color<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<HexColor>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
