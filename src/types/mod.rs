//! Shared types used throughout the library.

mod axis;

pub use axis::{Axis, Projection};

use crate::error::{PatternError, Result};
use std::collections::HashSet;

/// One entry of a schematic palette: a raw block name and its index in the
/// flat block data.
///
/// Indices need not be contiguous, but are unique in the source encoding.
/// Raw names may carry a state suffix (e.g. `minecraft:lever[facing=north]`)
/// that the palette resolver strips and merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Raw block name as it appears in the source, e.g. "minecraft:stone".
    pub name: String,
    /// Palette index referenced by the block data.
    pub index: i32,
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, index: i32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// A parsed structure document: dimensions, palette, and the flat block
/// index array.
///
/// The block data is laid out height-major: `index = y*(width*length) +
/// z*width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schematic {
    /// Extent along the X axis.
    pub width: u32,
    /// Extent along the Z axis.
    pub length: u32,
    /// Extent along the Y axis.
    pub height: u32,
    /// Palette entries, ordered by palette index.
    pub palette: Vec<PaletteEntry>,
    /// One palette index per voxel.
    pub block_data: Vec<i32>,
}

impl Schematic {
    /// Build a schematic, validating the document invariants:
    /// `block_data.len() == width*length*height` and every block-data value
    /// resolving to a palette entry.
    pub fn new(
        width: u32,
        length: u32,
        height: u32,
        mut palette: Vec<PaletteEntry>,
        block_data: Vec<i32>,
    ) -> Result<Self> {
        let expected = width as usize * length as usize * height as usize;
        if block_data.len() != expected {
            return Err(PatternError::SizeMismatch {
                expected,
                actual: block_data.len(),
            });
        }

        palette.sort_by_key(|entry| entry.index);

        let known: HashSet<i32> = palette.iter().map(|entry| entry.index).collect();
        if let Some(&bad) = block_data.iter().find(|id| !known.contains(id)) {
            return Err(PatternError::UnmappedBlockId(bad as i64));
        }

        Ok(Self {
            width,
            length,
            height,
            palette,
            block_data,
        })
    }

    /// Total number of voxels.
    pub fn volume(&self) -> usize {
        self.width as usize * self.length as usize * self.height as usize
    }

    /// Flat block-data index for a source coordinate.
    pub fn flat_index(&self, x: u32, y: u32, z: u32) -> usize {
        y as usize * (self.width as usize * self.length as usize)
            + z as usize * self.width as usize
            + x as usize
    }

    /// Extent of the given source axis.
    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.length,
        }
    }
}
