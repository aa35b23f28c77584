//! Run configuration: rule tables, alphabet, projection, templates.
//!
//! A [`ConvertConfig`] is externally supplied (typically as JSON) and
//! read-only during a run. It carries the empty-voxel identifiers, the
//! special and complex condition rules, the symbol alphabet, and the axis
//! projection.

use crate::error::{PatternError, Result};
use crate::types::Projection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Complete configuration for one conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Block names treated as empty space, mapped to the blank symbol.
    pub air_blocks: Vec<String>,
    /// Expression emitted for the blank symbol ("always matches").
    pub any_expression: String,
    /// Expression template for automatically assigned symbols; `{}` is
    /// replaced with the block name.
    pub block_expression: String,
    /// Rules matched by case-insensitive exact name equality.
    pub special_rules: Vec<SpecialRule>,
    /// Rules matched by case-insensitive substring search.
    pub complex_rules: Vec<ComplexRule>,
    /// Symbol alphabet for automatic allocation.
    pub alphabet: Alphabet,
    /// Axis permutation used by the layer projector.
    pub projection: Projection,
    /// Characters that open a block-state suffix in raw palette names.
    pub state_delimiters: Vec<char>,
    /// Collapse palette entries sharing a base name into one symbol.
    pub merge_state_suffixes: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            air_blocks: vec!["minecraft:air".to_string(), "air".to_string()],
            any_expression: "Predicates.any()".to_string(),
            block_expression: "Predicates.blocks(GetRegistries.getBlock('{}'))".to_string(),
            special_rules: Vec::new(),
            complex_rules: Vec::new(),
            alphabet: Alphabet::default(),
            projection: Projection::default(),
            state_delimiters: vec!['[', '('],
            merge_state_suffixes: true,
        }
    }
}

impl ConvertConfig {
    /// Load a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ConvertConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check rule-table consistency and the projection permutation.
    pub fn validate(&self) -> Result<()> {
        self.projection.validate()?;

        let mut seen = HashSet::new();
        for symbol in self
            .special_rules
            .iter()
            .map(|rule| &rule.symbol)
            .chain(self.complex_rules.iter().map(|rule| &rule.symbol))
        {
            if symbol.is_empty() {
                return Err(PatternError::InvalidConfig(
                    "rule symbol must not be empty".to_string(),
                ));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(PatternError::InvalidConfig(format!(
                    "symbol '{}' is assigned to more than one rule",
                    symbol
                )));
            }
        }
        Ok(())
    }

    /// Whether the name designates empty space.
    pub fn is_air(&self, name: &str) -> bool {
        self.air_blocks.iter().any(|air| air == name)
    }

    /// Strip a state suffix from a raw palette name, if merging is enabled.
    pub fn base_name<'a>(&self, name: &'a str) -> &'a str {
        if !self.merge_state_suffixes {
            return name;
        }
        match name.find(|c| self.state_delimiters.contains(&c)) {
            Some(pos) => &name[..pos],
            None => name,
        }
    }

    /// Find the special rule owning a symbol.
    pub fn special_rule(&self, symbol: &str) -> Option<&SpecialRule> {
        self.special_rules.iter().find(|rule| rule.symbol == symbol)
    }

    /// Find the complex rule owning a symbol.
    pub fn complex_rule(&self, symbol: &str) -> Option<&ComplexRule> {
        self.complex_rules.iter().find(|rule| rule.symbol == symbol)
    }

    /// Whether a symbol is pre-reserved by any rule.
    pub fn is_rule_symbol(&self, symbol: &str) -> bool {
        self.special_rule(symbol).is_some() || self.complex_rule(symbol).is_some()
    }
}

/// A rule matched by exact name equality (case-insensitive).
///
/// The rule's symbol is reserved and excluded from automatic allocation; its
/// expression is emitted as-is, with `{}` replaced by the first keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialRule {
    pub symbol: String,
    pub keywords: Vec<String>,
    pub condition: String,
}

/// A rule matched by substring search (case-insensitive), with an optional
/// chain of condition continuations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexRule {
    pub symbol: String,
    pub keywords: Vec<String>,
    /// Base expression template; `{}` is replaced with the first block name
    /// that resolved to this rule's symbol.
    pub condition: String,
    #[serde(default)]
    pub chain: Vec<ChainSegment>,
}

/// One segment of a condition chain: either a literal continuation appended
/// to the expression, or a group of alternatives joined by the OR combinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChainSegment {
    Literal(String),
    Or {
        or: Vec<SubCondition>,
    },
}

/// A member of an OR group: a plain expression, or a nested sub-rule with
/// its own chain (recursion is unbounded).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SubCondition {
    Literal(String),
    Nested {
        condition: String,
        #[serde(default)]
        chain: Vec<ChainSegment>,
    },
}

/// Symbol alphabet for automatic allocation.
///
/// Categories are tried in order; every character of a category is a
/// candidate single-character symbol. When all singles are taken and
/// `extend_pairs` is set, two-letter combinations of uppercase letters
/// follow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Alphabet {
    pub categories: Vec<String>,
    pub extend_pairs: bool,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            categories: vec![
                ('A'..='Z').collect(),
                ('a'..='z').collect(),
                ('0'..='9').collect(),
                "!@#$%^&*-+=".to_string(),
            ],
            extend_pairs: true,
        }
    }
}
