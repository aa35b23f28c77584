//! Condition synthesis: expression trees, rendering, and per-symbol
//! match-expression construction.

pub mod expr;
pub mod synthesizer;

pub use expr::{Expr, ExprRenderer};
pub use synthesizer::{Condition, ConditionSynthesizer};
