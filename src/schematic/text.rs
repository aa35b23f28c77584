//! Textual structure dump parsing.
//!
//! The textual form carries the same logical fields as the binary container,
//! embedded as labeled substrings:
//!
//! ```text
//! Width: 3S
//! Length: 1S
//! Height: 2S
//! Palette: { "minecraft:air": 0, "minecraft:stone": 1 }
//! BlockData: bytes(0, 1, 1)
//! ```
//!
//! Whitespace around names and values is tolerated, as are `\"` escapes
//! inside quoted names and the trailing numeric-type suffix on dimensions.

use crate::error::{PatternError, Result};
use crate::types::{PaletteEntry, Schematic};

/// Parse a textual structure dump into a schematic.
pub fn parse_text_dump(content: &str) -> Result<Schematic> {
    let width = parse_dimension(content, "Width")?;
    let length = parse_dimension(content, "Length")?;
    let height = parse_dimension(content, "Height")?;
    let palette = parse_palette(content)?;
    let block_data = parse_block_data(content)?;

    Schematic::new(width, length, height, palette, block_data)
}

fn parse_dimension(content: &str, label: &str) -> Result<u32> {
    let marker = format!("{}:", label);
    let start = content
        .find(&marker)
        .ok_or_else(|| PatternError::MissingField(label.to_string()))?;
    let rest = content[start + marker.len()..].trim_start();

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(PatternError::Malformed(format!(
            "{} has no numeric value",
            label
        )));
    }
    let value: u32 = digits.parse().map_err(|_| {
        PatternError::Malformed(format!("{} value '{}' out of range", label, digits))
    })?;
    if value == 0 {
        return Err(PatternError::Malformed(format!(
            "{} must be a positive integer",
            label
        )));
    }
    Ok(value)
}

fn parse_palette(content: &str) -> Result<Vec<PaletteEntry>> {
    let start = content
        .find("Palette:")
        .ok_or_else(|| PatternError::MissingField("Palette".to_string()))?;
    let rest = &content[start + "Palette:".len()..];
    let open = rest.find('{').ok_or_else(|| {
        PatternError::Malformed("Palette is not followed by a '{' block".to_string())
    })?;
    let body = &rest[open + 1..];

    let mut entries = Vec::new();
    let mut chars = body.char_indices().peekable();

    loop {
        // Skip separators up to the next entry or the closing brace.
        loop {
            match chars.next() {
                Some((_, c)) if c.is_whitespace() || c == ',' => continue,
                Some((_, '}')) => return Ok(sorted(entries)),
                Some((_, '"')) => break,
                Some((_, c)) => {
                    return Err(PatternError::Malformed(format!(
                        "unexpected '{}' in palette block",
                        c
                    )))
                }
                None => {
                    return Err(PatternError::Malformed(
                        "palette block is not closed".to_string(),
                    ))
                }
            }
        }

        // Quoted name with backslash escapes.
        let mut name = String::new();
        loop {
            match chars.next() {
                Some((_, '\\')) => match chars.next() {
                    Some((_, escaped)) => name.push(escaped),
                    None => {
                        return Err(PatternError::Malformed(
                            "palette name ends in a dangling escape".to_string(),
                        ))
                    }
                },
                Some((_, '"')) => break,
                Some((_, c)) => name.push(c),
                None => {
                    return Err(PatternError::Malformed(
                        "palette name is not closed".to_string(),
                    ))
                }
            }
        }

        // ':' then the integer index.
        loop {
            match chars.next() {
                Some((_, c)) if c.is_whitespace() => continue,
                Some((_, ':')) => break,
                _ => {
                    return Err(PatternError::Malformed(format!(
                        "palette entry '{}' has no index",
                        name
                    )))
                }
            }
        }
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        let mut digits = String::new();
        if matches!(chars.peek(), Some((_, '-'))) {
            digits.push('-');
            chars.next();
        }
        while let Some(&(_, c)) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            chars.next();
        }
        let index: i32 = digits.parse().map_err(|_| {
            PatternError::Malformed(format!("palette entry '{}' has no index", name))
        })?;

        entries.push(PaletteEntry::new(name, index));
    }
}

fn sorted(mut entries: Vec<PaletteEntry>) -> Vec<PaletteEntry> {
    entries.sort_by_key(|entry| entry.index);
    entries
}

fn parse_block_data(content: &str) -> Result<Vec<i32>> {
    let start = content
        .find("BlockData:")
        .ok_or_else(|| PatternError::MissingField("BlockData".to_string()))?;
    let rest = content[start + "BlockData:".len()..].trim_start();
    let body = rest.strip_prefix("bytes(").ok_or_else(|| {
        PatternError::Malformed("BlockData is not a bytes(...) list".to_string())
    })?;
    let end = body.find(')').ok_or_else(|| {
        PatternError::Malformed("BlockData list is not closed".to_string())
    })?;
    let body = &body[..end];

    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .map(|token| {
            token.trim().parse::<i32>().map_err(|_| {
                PatternError::Malformed(format!("invalid BlockData value '{}'", token.trim()))
            })
        })
        .collect()
}
