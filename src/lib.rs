//! # Schematic Pattern
//!
//! A Rust library for converting Minecraft schematics into multiblock
//! pattern definitions.
//!
//! ## Overview
//!
//! This library takes a structure document (a `.schem`-style tagged binary
//! container or an equivalent textual dump) and produces a deterministic
//! symbolic representation: every block type gets a stable symbol, the
//! volume is re-sliced into ordered 2D layer strings, and each symbol gets
//! a boolean match expression built from configurable rules.
//!
//! ## Quick Start
//!
//! ```ignore
//! use schematic_pattern::{load_schematic, Converter, ConvertConfig};
//!
//! // Load a structure file
//! let schematic = load_schematic("path/to/structure.schem")?;
//!
//! // Create a converter
//! let converter = Converter::with_config(ConvertConfig::default())?;
//!
//! // Run the pipeline: palette resolution, layer projection, condition
//! // synthesis
//! let conversion = converter.convert(&schematic)?;
//!
//! for layer in conversion.layers.layers() {
//!     // feed rows to an emitter
//! }
//! for condition in &conversion.conditions {
//!     println!("{} -> {}", condition.symbol, condition.expression);
//! }
//! ```
//!
//! ## Pipeline
//!
//! The stages run strictly in sequence; each stage's output is a
//! precondition for the next:
//!
//! 1. **Loader** ([`schematic`]) parses the source into a [`Schematic`].
//! 2. **Palette resolver** ([`palette`]) assigns symbols, merges duplicate
//!    entries, and produces the block-data remap.
//! 3. **Layer projector** ([`layers`]) re-slices the remapped data into an
//!    immutable [`LayerSet`] under the configured axis permutation.
//! 4. **Condition synthesizer** ([`condition`]) builds one match expression
//!    per symbol.
//!
//! All tables are scoped to a single conversion; fatal errors abort the
//! whole run, warnings are collected into the [`Conversion`] output.

pub mod condition;
pub mod config;
pub mod emit;
pub mod error;
pub mod layers;
pub mod palette;
pub mod schematic;
pub mod types;

// Re-export main types for convenience
pub use condition::{Condition, ConditionSynthesizer, Expr, ExprRenderer};
pub use config::{Alphabet, ChainSegment, ComplexRule, ConvertConfig, SpecialRule, SubCondition};
pub use error::{PatternError, Result, Warning};
pub use layers::{Layer, LayerSet, Projector};
pub use palette::{PaletteResolver, ResolvedPalette, SymbolAllocator, SymbolTable};
pub use types::{Axis, PaletteEntry, Projection, Schematic};

/// Load a schematic from a file path (binary container or textual dump).
pub fn load_schematic<P: AsRef<std::path::Path>>(path: P) -> Result<Schematic> {
    schematic::load_from_path(path)
}

/// Load a schematic from raw bytes, sniffing the encoding.
pub fn load_schematic_from_bytes(data: &[u8]) -> Result<Schematic> {
    schematic::load_sniffed(data)
}

/// The full conversion pipeline, parameterized by a [`ConvertConfig`].
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a converter with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ConvertConfig::default(),
        }
    }

    /// Create a converter with a custom configuration.
    pub fn with_config(config: ConvertConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run the pipeline on a schematic.
    pub fn convert(&self, schematic: &Schematic) -> Result<Conversion> {
        let resolved = PaletteResolver::new(&self.config).resolve(&schematic.palette)?;

        // The duplicate merge must be complete before any index is computed.
        let mut block_data = schematic.block_data.clone();
        resolved.apply_remap(&mut block_data);
        let remapped = Schematic {
            block_data,
            ..schematic.clone()
        };

        let projector = Projector::new(&resolved.symbols, self.config.projection)?;
        let (layers, mut warnings) = projector.project(&remapped);

        let synthesizer = ConditionSynthesizer::new(&self.config, &resolved.symbols);
        let (conditions, synthesis_warnings) = synthesizer.synthesize(&layers);
        warnings.extend(synthesis_warnings);

        Ok(Conversion {
            layers,
            conditions,
            symbols: resolved.symbols,
            warnings,
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of one conversion run.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Ordered layers of ordered row strings.
    pub layers: LayerSet,
    /// Ordered `(symbol, expression)` condition pairs.
    pub conditions: Vec<Condition>,
    /// The finalized symbol table.
    pub symbols: SymbolTable,
    /// Non-fatal conditions collected across all stages.
    pub warnings: Vec<Warning>,
}
