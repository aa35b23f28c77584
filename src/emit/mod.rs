//! Output emission.
//!
//! Emitters are pure string sinks: they format layers and conditions into
//! target-language sources and leave paths and file writing to the caller.

pub mod java;

pub use java::{layer_class, layer_groups, pattern_class, where_conditions};
