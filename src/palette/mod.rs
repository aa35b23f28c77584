//! Palette resolution: symbols, allocation, and duplicate merging.

pub mod allocator;
pub mod resolver;

pub use allocator::SymbolAllocator;
pub use resolver::PaletteResolver;

use std::collections::HashMap;

/// Bidirectional mapping between voxel-type names, palette indices, and the
/// symbols they render as.
///
/// Name entries keep insertion order, so "the first name that resolved to a
/// symbol" is well-defined for condition synthesis.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<(String, String)>,
    name_to_symbol: HashMap<String, String>,
    index_to_symbol: HashMap<i32, String>,
}

impl SymbolTable {
    /// The reserved blank symbol for empty/air voxels.
    pub const BLANK: &'static str = " ";
    /// The reserved glyph substituted when projection cannot resolve a cell.
    pub const UNKNOWN: &'static str = "?";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name/index assignment to a symbol.
    pub fn assign(&mut self, name: &str, index: i32, symbol: &str) {
        if !self.name_to_symbol.contains_key(name) {
            self.names.push((name.to_string(), symbol.to_string()));
            self.name_to_symbol
                .insert(name.to_string(), symbol.to_string());
        }
        self.index_to_symbol.insert(index, symbol.to_string());
    }

    /// Symbol for a palette index.
    pub fn symbol_for_index(&self, index: i32) -> Option<&str> {
        self.index_to_symbol.get(&index).map(String::as_str)
    }

    /// Symbol for a voxel-type name.
    pub fn symbol_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_symbol.get(name).map(String::as_str)
    }

    /// The first name (in insertion order) that resolved to a symbol.
    pub fn first_name_for(&self, symbol: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, s)| s == symbol)
            .map(|(name, _)| name.as_str())
    }

    /// All (name, symbol) assignments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .map(|(name, symbol)| (name.as_str(), symbol.as_str()))
    }

    /// Number of distinct names assigned.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Output of palette resolution: the finalized symbol table plus the
/// superseded-index remap produced by duplicate merging.
#[derive(Debug, Clone)]
pub struct ResolvedPalette {
    pub symbols: SymbolTable,
    /// superseded palette index -> canonical (first) index.
    pub remap: HashMap<i32, i32>,
}

impl ResolvedPalette {
    /// Rewrite every superseded index in `block_data` to its canonical one.
    ///
    /// Canonical indices are never themselves superseded, so the rewrite is
    /// closed and idempotent.
    pub fn apply_remap(&self, block_data: &mut [i32]) {
        if self.remap.is_empty() {
            return;
        }
        for value in block_data.iter_mut() {
            if let Some(&canonical) = self.remap.get(value) {
                *value = canonical;
            }
        }
    }
}
