//! Binary structure container loading.
//!
//! The binary form is a (usually gzip-compressed) tagged container with
//! `Width`/`Length`/`Height` integers, a `Palette` compound mapping block
//! names to palette indices, and a `BlockData` integer array.

use super::nbt::{self, Tag};
use crate::error::{PatternError, Result};
use crate::types::{PaletteEntry, Schematic};
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::io::Read;

/// Load a schematic from binary container bytes.
///
/// A gzip envelope is detected by its magic and inflated transparently.
pub fn load_from_bytes(data: &[u8]) -> Result<Schematic> {
    let data = inflate_if_gzip(data)?;
    let (_, root) = nbt::read_root(&data)?;

    // Newer container revisions nest everything under a "Schematic" child;
    // older ones put the fields at the root.
    let nested = root
        .get("Schematic")
        .and_then(|tag| tag.compound().map(|_| tag.clone()));
    let root = nested.unwrap_or(root);

    let width = require_dimension(&root, "Width")?;
    let length = require_dimension(&root, "Length")?;
    let height = require_dimension(&root, "Height")?;

    log::debug!("structure dimensions: {}x{}x{}", width, length, height);

    let palette = read_palette(&root)?;
    let block_data = read_block_data(&root, &palette)?;

    Schematic::new(width, length, height, palette, block_data)
}

fn inflate_if_gzip(data: &[u8]) -> Result<Vec<u8>> {
    if data.starts_with(&[0x1f, 0x8b]) {
        let mut decoded = Vec::new();
        GzDecoder::new(data).read_to_end(&mut decoded)?;
        Ok(decoded)
    } else {
        Ok(data.to_vec())
    }
}

fn require_dimension(root: &Tag, name: &str) -> Result<u32> {
    let tag = root
        .get(name)
        .ok_or_else(|| PatternError::MissingField(name.to_string()))?;
    let value = tag.as_int().ok_or_else(|| {
        PatternError::Malformed(format!("{} is not an integer tag", name))
    })?;
    if value <= 0 || value > u32::MAX as i64 {
        return Err(PatternError::Malformed(format!(
            "{} must be a positive integer, got {}",
            name, value
        )));
    }
    Ok(value as u32)
}

fn read_palette(root: &Tag) -> Result<Vec<PaletteEntry>> {
    let palette = root
        .get("Palette")
        .ok_or_else(|| PatternError::MissingField("Palette".to_string()))?;
    let map = palette.compound().ok_or_else(|| {
        PatternError::Malformed("Palette is not a compound tag".to_string())
    })?;

    let mut entries = Vec::with_capacity(map.len());
    for (name, tag) in map {
        let index = tag.as_int().ok_or_else(|| {
            PatternError::Malformed(format!(
                "palette entry '{}' has a non-integer index",
                name
            ))
        })?;
        let index = i32::try_from(index).map_err(|_| {
            PatternError::Malformed(format!(
                "palette index {} for '{}' out of range",
                index, name
            ))
        })?;
        entries.push(PaletteEntry::new(name.clone(), index));
    }
    entries.sort_by_key(|entry| entry.index);
    Ok(entries)
}

fn read_block_data(root: &Tag, palette: &[PaletteEntry]) -> Result<Vec<i32>> {
    let tag = root
        .get("BlockData")
        .ok_or_else(|| PatternError::MissingField("BlockData".to_string()))?;
    let known: HashSet<i32> = palette.iter().map(|entry| entry.index).collect();

    match tag {
        Tag::ByteArray(values) => values
            .iter()
            .map(|&raw| widen_byte(raw, &known))
            .collect(),
        Tag::IntArray(values) => values
            .iter()
            .map(|&raw| check_known(raw as i64, &known))
            .collect(),
        Tag::LongArray(values) => values
            .iter()
            .map(|&raw| check_known(raw, &known))
            .collect(),
        Tag::List(items) => items
            .iter()
            .map(|item| {
                let raw = item.as_int().ok_or_else(|| {
                    PatternError::Malformed(
                        "BlockData list holds a non-integer element".to_string(),
                    )
                })?;
                check_known(raw, &known)
            })
            .collect(),
        _ => Err(PatternError::Malformed(
            "BlockData is not an integer array".to_string(),
        )),
    }
}

/// Widen a stored byte to a palette index.
///
/// Palette indices are wider than the stored bytes, so a negative byte may
/// be the signed rendering of a high index: try the signed value first, then
/// the unsigned reinterpretation of the same byte, before giving up.
fn widen_byte(raw: i8, known: &HashSet<i32>) -> Result<i32> {
    let signed = raw as i32;
    if known.contains(&signed) {
        return Ok(signed);
    }
    let unsigned = raw as u8 as i32;
    if known.contains(&unsigned) {
        return Ok(unsigned);
    }
    Err(PatternError::UnmappedBlockId(signed as i64))
}

fn check_known(raw: i64, known: &HashSet<i32>) -> Result<i32> {
    match i32::try_from(raw) {
        Ok(value) if known.contains(&value) => Ok(value),
        _ => Err(PatternError::UnmappedBlockId(raw)),
    }
}
