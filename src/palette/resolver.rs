//! Palette entry resolution.
//!
//! Each entry runs through a first-match-wins pipeline: duplicate-suffix
//! merge, empty-voxel rule, special exact-keyword rules, complex
//! substring-keyword rules, then automatic allocation.

use super::allocator::SymbolAllocator;
use super::{ResolvedPalette, SymbolTable};
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::types::PaletteEntry;
use std::collections::HashMap;

/// Resolves raw palette entries into a finalized [`SymbolTable`].
pub struct PaletteResolver<'a> {
    config: &'a ConvertConfig,
}

impl<'a> PaletteResolver<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self { config }
    }

    /// Assign a symbol to every distinct voxel type and collect the
    /// superseded-index remap for entries collapsed by base name.
    pub fn resolve(&self, palette: &[PaletteEntry]) -> Result<ResolvedPalette> {
        let mut allocator = SymbolAllocator::new(&self.config.alphabet);
        allocator.reserve(SymbolTable::BLANK);
        allocator.reserve(SymbolTable::UNKNOWN);
        for rule in &self.config.special_rules {
            allocator.reserve(&rule.symbol);
        }
        for rule in &self.config.complex_rules {
            allocator.reserve(&rule.symbol);
        }

        let mut symbols = SymbolTable::new();
        let mut remap = HashMap::new();
        let mut first_index_by_base: HashMap<String, i32> = HashMap::new();

        for entry in palette {
            let base = self.config.base_name(&entry.name);

            // Entries sharing a base name collapse onto the first index.
            if let Some(&first) = first_index_by_base.get(base) {
                log::debug!(
                    "duplicate palette entry '{}': index {} superseded by {}",
                    entry.name,
                    entry.index,
                    first
                );
                remap.insert(entry.index, first);
                continue;
            }
            first_index_by_base.insert(base.to_string(), entry.index);

            let symbol = self.match_symbol(base, &mut allocator)?;
            log::debug!("palette entry '{}' (index {}) -> '{}'", base, entry.index, symbol);
            symbols.assign(base, entry.index, &symbol);
        }

        Ok(ResolvedPalette { symbols, remap })
    }

    fn match_symbol(&self, name: &str, allocator: &mut SymbolAllocator) -> Result<String> {
        if self.config.is_air(name) {
            return Ok(SymbolTable::BLANK.to_string());
        }

        for rule in &self.config.special_rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(name))
            {
                return Ok(rule.symbol.clone());
            }
        }

        let lowered = name.to_lowercase();
        for rule in &self.config.complex_rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            {
                return Ok(rule.symbol.clone());
            }
        }

        allocator.next()
    }
}
