//! Error types for the schematic pattern converter.

use thiserror::Error;

/// Result type alias using PatternError.
pub type Result<T> = std::result::Result<T, PatternError>;

/// Main error type for schematic conversion operations.
///
/// Every variant here is fatal: the pipeline aborts and no output artifacts
/// are produced. Recoverable conditions are reported as [`Warning`]s instead.
#[derive(Error, Debug)]
pub enum PatternError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON configuration.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent from the source document.
    #[error("missing field: {0}")]
    MissingField(String),

    /// The source document does not match the expected grammar.
    #[error("malformed structure data: {0}")]
    Malformed(String),

    /// Block data length does not match the declared dimensions.
    #[error("size mismatch: expected {expected} block entries, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A block-data value has no corresponding palette entry.
    #[error("unmapped block id: {0}")]
    UnmappedBlockId(i64),

    /// The symbol alphabet ran out before every voxel type was assigned.
    #[error(
        "symbol alphabet exhausted: reduce the number of unique block types \
         or extend the alphabet categories"
    )]
    SymbolsExhausted,

    /// The configured projection axes are not a permutation of X/Y/Z.
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    /// The run configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal condition collected during conversion.
///
/// Warnings are surfaced alongside the output; a run with only warnings
/// completes normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A computed flat index fell outside the block data, or a block id had
    /// no resolved symbol, during layer projection. The affected cell is
    /// rendered with the unknown glyph.
    Projection {
        layer: usize,
        row: usize,
        column: usize,
        detail: String,
    },

    /// A symbol appeared in the layer text but had no resolvable source name
    /// during condition synthesis. Its condition line is omitted.
    Synthesis { symbol: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Projection {
                layer,
                row,
                column,
                detail,
            } => write!(
                f,
                "projection: layer {} row {} column {}: {}",
                layer, row, column, detail
            ),
            Warning::Synthesis { symbol } => {
                write!(f, "synthesis: no source block for symbol '{}'", symbol)
            }
        }
    }
}
