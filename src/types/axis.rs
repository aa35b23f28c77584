//! Axis and projection types for layer reorientation.

use crate::error::{PatternError, Result};
use serde::{Deserialize, Serialize};

/// The three source axes of a schematic.
///
/// X spans the width, Y the height, Z the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// The coordinate permutation applied when re-slicing a schematic into
/// layers.
///
/// `layer` is the source axis the layer index iterates, `row` the axis rows
/// iterate within a layer, `column` the axis characters iterate within a row.
/// The three must be a permutation of X/Y/Z. At most one axis may be
/// reversed, which flips its iteration direction for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    pub layer: Axis,
    pub row: Axis,
    pub column: Axis,
    pub reverse: Option<Axis>,
}

impl Default for Projection {
    fn default() -> Self {
        // Identity convention: one layer per Z slice, rows bottom-to-top,
        // columns west-to-east.
        Self {
            layer: Axis::Z,
            row: Axis::Y,
            column: Axis::X,
            reverse: None,
        }
    }
}

impl Projection {
    /// The second observed orientation: layers iterate the width axis and
    /// columns run along the length axis in reverse.
    pub fn rotated() -> Self {
        Self {
            layer: Axis::X,
            row: Axis::Y,
            column: Axis::Z,
            reverse: Some(Axis::Z),
        }
    }

    /// Check that layer/row/column cover all three axes, and that the
    /// reversed axis (if any) is one of them.
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; 3];
        for axis in [self.layer, self.row, self.column] {
            seen[axis as usize] = true;
        }
        if seen != [true; 3] {
            return Err(PatternError::InvalidProjection(format!(
                "layer/row/column must be a permutation of x/y/z, got {}/{}/{}",
                self.layer, self.row, self.column
            )));
        }
        Ok(())
    }

    /// Whether iteration along `axis` is reversed.
    pub fn is_reversed(&self, axis: Axis) -> bool {
        self.reverse == Some(axis)
    }
}
