//! Layer projection: re-slicing the block data into ordered 2D text layers.

use crate::error::{Result, Warning};
use crate::palette::SymbolTable;
use crate::types::{Axis, Projection, Schematic};
use std::collections::BTreeSet;

/// One 2D slice of the structure, as ordered row strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    rows: Vec<String>,
}

impl Layer {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The ordered sequence of layers produced by one projection.
///
/// Layers are 1-indexed in emission order. The set also records every
/// distinct symbol placed into its rows, collected while projecting, because
/// row strings cannot be re-tokenized once multi-character symbols are
/// in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSet {
    layers: Vec<Layer>,
    symbols: BTreeSet<String>,
}

impl LayerSet {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer by 1-based emission index.
    pub fn get(&self, number: usize) -> Option<&Layer> {
        number.checked_sub(1).and_then(|i| self.layers.get(i))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Distinct symbols appearing anywhere in the set, in lexical order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

/// Projects a schematic onto a [`LayerSet`] under a fixed axis permutation.
pub struct Projector<'a> {
    table: &'a SymbolTable,
    projection: Projection,
}

impl<'a> Projector<'a> {
    pub fn new(table: &'a SymbolTable, projection: Projection) -> Result<Self> {
        projection.validate()?;
        Ok(Self { table, projection })
    }

    /// Re-slice the (already remapped) block data into layers.
    ///
    /// A cell whose computed index falls outside the block data, or whose
    /// block id has no symbol, renders as the unknown glyph and is reported
    /// as a warning rather than aborting, since it signals a reprojection bug,
    /// not bad input.
    pub fn project(&self, doc: &Schematic) -> (LayerSet, Vec<Warning>) {
        let layer_extent = doc.extent(self.projection.layer);
        let row_extent = doc.extent(self.projection.row);
        let column_extent = doc.extent(self.projection.column);

        let mut layers = Vec::with_capacity(layer_extent as usize);
        let mut symbols = BTreeSet::new();
        let mut warnings = Vec::new();

        for layer_i in 0..layer_extent {
            let mut rows = Vec::with_capacity(row_extent as usize);
            for row_i in 0..row_extent {
                let mut row = String::with_capacity(column_extent as usize);
                for column_i in 0..column_extent {
                    let mut coords = [0u32; 3];
                    self.place(&mut coords, self.projection.layer, layer_i, layer_extent);
                    self.place(&mut coords, self.projection.row, row_i, row_extent);
                    self.place(&mut coords, self.projection.column, column_i, column_extent);
                    let [x, y, z] = coords;

                    let index = doc.flat_index(x, y, z);
                    let symbol = if index < doc.block_data.len() {
                        let block_id = doc.block_data[index];
                        match self.table.symbol_for_index(block_id) {
                            Some(symbol) => symbol,
                            None => {
                                self.warn(
                                    &mut warnings,
                                    layer_i,
                                    row_i,
                                    column_i,
                                    format!("block id {} has no symbol", block_id),
                                );
                                SymbolTable::UNKNOWN
                            }
                        }
                    } else {
                        self.warn(
                            &mut warnings,
                            layer_i,
                            row_i,
                            column_i,
                            format!("computed index {} out of range", index),
                        );
                        SymbolTable::UNKNOWN
                    };

                    row.push_str(symbol);
                    symbols.insert(symbol.to_string());
                }
                rows.push(row);
            }
            layers.push(Layer { rows });
        }

        (LayerSet { layers, symbols }, warnings)
    }

    fn place(&self, coords: &mut [u32; 3], axis: Axis, value: u32, extent: u32) {
        let value = if self.projection.is_reversed(axis) {
            extent - 1 - value
        } else {
            value
        };
        let slot = match axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };
        coords[slot] = value;
    }

    fn warn(
        &self,
        warnings: &mut Vec<Warning>,
        layer_i: u32,
        row_i: u32,
        column_i: u32,
        detail: String,
    ) {
        log::warn!(
            "projection degraded at layer {} row {} column {}: {}",
            layer_i + 1,
            row_i,
            column_i,
            detail
        );
        warnings.push(Warning::Projection {
            layer: layer_i as usize + 1,
            row: row_i as usize,
            column: column_i as usize,
            detail,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertConfig;
    use crate::palette::PaletteResolver;
    use crate::types::PaletteEntry;

    fn sample_doc() -> Schematic {
        Schematic::new(
            3,
            1,
            2,
            vec![
                PaletteEntry::new("minecraft:air", 0),
                PaletteEntry::new("minecraft:stone", 1),
                PaletteEntry::new("minecraft:glass", 2),
            ],
            vec![0, 1, 2, 1, 0, 2],
        )
        .unwrap()
    }

    fn resolve(doc: &Schematic) -> SymbolTable {
        let config = ConvertConfig::default();
        PaletteResolver::new(&config)
            .resolve(&doc.palette)
            .unwrap()
            .symbols
    }

    #[test]
    fn test_identity_projection_rows() {
        let doc = sample_doc();
        let table = resolve(&doc);
        let projector = Projector::new(&table, Projection::default()).unwrap();
        let (layers, warnings) = projector.project(&doc);

        assert!(warnings.is_empty());
        assert_eq!(layers.len(), 1);
        let layer = layers.get(1).unwrap();
        assert_eq!(layer.len(), 2);
        // stone -> A, glass -> B; bottom row first.
        assert_eq!(layer.row(0), Some(" AB"));
        assert_eq!(layer.row(1), Some("A B"));
    }

    #[test]
    fn test_rotated_projection() {
        let doc = sample_doc();
        let table = resolve(&doc);
        let projector = Projector::new(&table, Projection::rotated()).unwrap();
        let (layers, warnings) = projector.project(&doc);

        assert!(warnings.is_empty());
        // One layer per X slice, rows by Y, a single column along reversed Z.
        assert_eq!(layers.len(), 3);
        assert_eq!(layers.get(1).unwrap().rows(), &[" ", "A"]);
        assert_eq!(layers.get(2).unwrap().rows(), &["A", " "]);
        assert_eq!(layers.get(3).unwrap().rows(), &["B", "B"]);
    }

    #[test]
    fn test_symbols_collected() {
        let doc = sample_doc();
        let table = resolve(&doc);
        let projector = Projector::new(&table, Projection::default()).unwrap();
        let (layers, _) = projector.project(&doc);
        let symbols: Vec<&str> = layers.symbols().collect();
        assert_eq!(symbols, vec![" ", "A", "B"]);
    }

    #[test]
    fn test_unresolved_block_id_degrades_to_unknown() {
        let doc = sample_doc();
        // A table that never saw glass: its cells render as '?'.
        let mut table = SymbolTable::new();
        table.assign("minecraft:air", 0, SymbolTable::BLANK);
        table.assign("minecraft:stone", 1, "A");

        let projector = Projector::new(&table, Projection::default()).unwrap();
        let (layers, warnings) = projector.project(&doc);

        assert_eq!(layers.get(1).unwrap().row(0), Some(" A?"));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], Warning::Projection { layer: 1, .. }));
    }

    #[test]
    fn test_truncated_block_data_degrades_to_unknown() {
        // Bypass the validating constructor to simulate a reprojection bug.
        let doc = Schematic {
            width: 2,
            length: 1,
            height: 1,
            palette: vec![PaletteEntry::new("minecraft:air", 0)],
            block_data: vec![0],
        };
        let mut table = SymbolTable::new();
        table.assign("minecraft:air", 0, SymbolTable::BLANK);

        let projector = Projector::new(&table, Projection::default()).unwrap();
        let (layers, warnings) = projector.project(&doc);
        assert_eq!(layers.get(1).unwrap().row(0), Some(" ?"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let doc = sample_doc();
        let table = resolve(&doc);
        let projector = Projector::new(&table, Projection::rotated()).unwrap();
        let (first, _) = projector.project(&doc);
        let (second, _) = projector.project(&doc);
        assert_eq!(first, second);
    }
}
