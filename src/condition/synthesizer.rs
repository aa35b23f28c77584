//! Condition synthesis: one match expression per symbol in the layer set.

use super::expr::{Expr, ExprRenderer};
use crate::config::{ChainSegment, ConvertConfig, SubCondition};
use crate::error::Warning;
use crate::layers::LayerSet;
use crate::palette::SymbolTable;

/// A synthesized `(symbol, expression)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub symbol: String,
    pub expression: String,
}

/// Builds match expressions for every symbol present in a [`LayerSet`].
pub struct ConditionSynthesizer<'a> {
    config: &'a ConvertConfig,
    table: &'a SymbolTable,
    renderer: ExprRenderer,
}

impl<'a> ConditionSynthesizer<'a> {
    pub fn new(config: &'a ConvertConfig, table: &'a SymbolTable) -> Self {
        Self {
            config,
            table,
            renderer: ExprRenderer::default(),
        }
    }

    /// Override the expression renderer.
    pub fn with_renderer(mut self, renderer: ExprRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Synthesize conditions in deterministic order: rule-reserved symbols
    /// first, then automatically allocated ones, lexical within each group.
    ///
    /// A symbol with no resolvable source name is skipped with a warning;
    /// it can only appear if projection already degraded.
    pub fn synthesize(&self, layers: &LayerSet) -> (Vec<Condition>, Vec<Warning>) {
        let mut symbols: Vec<&str> = layers.symbols().collect();
        symbols.sort_by_key(|symbol| (!self.config.is_rule_symbol(symbol), *symbol));

        let mut conditions = Vec::with_capacity(symbols.len());
        let mut warnings = Vec::new();

        for symbol in symbols {
            match self.expression_for(symbol) {
                Some(expression) => conditions.push(Condition {
                    symbol: symbol.to_string(),
                    expression,
                }),
                None => {
                    log::warn!("no source block for symbol '{}', condition omitted", symbol);
                    warnings.push(Warning::Synthesis {
                        symbol: symbol.to_string(),
                    });
                }
            }
        }

        (conditions, warnings)
    }

    fn expression_for(&self, symbol: &str) -> Option<String> {
        if symbol == SymbolTable::BLANK {
            return Some(self.config.any_expression.clone());
        }

        if let Some(rule) = self.config.special_rule(symbol) {
            let subject = rule
                .keywords
                .first()
                .map(String::as_str)
                .or_else(|| self.table.first_name_for(symbol))?;
            return Some(substitute(&rule.condition, subject));
        }

        if let Some(rule) = self.config.complex_rule(symbol) {
            let name = self.table.first_name_for(symbol)?;
            let base = substitute(&rule.condition, name);
            let expr = chain_expr(base, &rule.chain);
            return Some(self.renderer.render(&expr));
        }

        let name = self.table.first_name_for(symbol)?;
        Some(substitute(&self.config.block_expression, name))
    }
}

/// Replace the first `{}` placeholder, if the template has one.
fn substitute(template: &str, value: &str) -> String {
    if template.contains("{}") {
        template.replacen("{}", value, 1)
    } else {
        template.to_string()
    }
}

/// Lower a configured chain onto an [`Expr`] tree.
fn chain_expr(base: String, chain: &[ChainSegment]) -> Expr {
    if chain.is_empty() {
        return Expr::literal(base);
    }
    Expr::chain(
        Expr::literal(base),
        chain.iter().map(segment_expr).collect(),
    )
}

fn segment_expr(segment: &ChainSegment) -> Expr {
    match segment {
        ChainSegment::Literal(text) => Expr::literal(text.clone()),
        ChainSegment::Or { or } => Expr::OrGroup(or.iter().map(sub_expr).collect()),
    }
}

fn sub_expr(sub: &SubCondition) -> Expr {
    match sub {
        SubCondition::Literal(text) => Expr::literal(text.clone()),
        SubCondition::Nested { condition, chain } => chain_expr(condition.clone(), chain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComplexRule, SpecialRule};
    use crate::layers::Projector;
    use crate::palette::PaletteResolver;
    use crate::types::{PaletteEntry, Projection, Schematic};

    fn pipeline(config: &ConvertConfig, doc: &Schematic) -> (Vec<Condition>, Vec<Warning>) {
        let resolved = PaletteResolver::new(config).resolve(&doc.palette).unwrap();
        let mut data = doc.block_data.clone();
        resolved.apply_remap(&mut data);
        let doc = Schematic {
            block_data: data,
            ..doc.clone()
        };
        let projector = Projector::new(&resolved.symbols, config.projection).unwrap();
        let (layers, _) = projector.project(&doc);
        ConditionSynthesizer::new(config, &resolved.symbols).synthesize(&layers)
    }

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

    #[test]
    fn test_plain_scenario_conditions() {
        let config = ConvertConfig::default();
        let (conditions, warnings) = pipeline(&config, &sample_doc());

        assert!(warnings.is_empty());
        let symbols: Vec<&str> = conditions.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec![" ", "A", "B"]);

        assert_eq!(conditions[0].expression, "Predicates.any()");
        assert_eq!(
            conditions[1].expression,
            "Predicates.blocks(GetRegistries.getBlock('minecraft:stone'))"
        );
        assert_eq!(
            conditions[2].expression,
            "Predicates.blocks(GetRegistries.getBlock('minecraft:glass'))"
        );
    }

    #[test]
    fn test_special_rule_uses_first_keyword() {
        let config = ConvertConfig {
            special_rules: vec![SpecialRule {
                symbol: "~".to_string(),
                keywords: vec!["mod:controller".to_string()],
                condition: "Predicates.controller(blocks(definition.getBlock('{}')))".to_string(),
            }],
            ..ConvertConfig::default()
        };
        let doc = Schematic::new(
            1,
            1,
            1,
            vec![PaletteEntry::new("mod:controller", 0)],
            vec![0],
        )
        .unwrap();
        let (conditions, warnings) = pipeline(&config, &doc);

        assert!(warnings.is_empty());
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].symbol, "~");
        assert_eq!(
            conditions[0].expression,
            "Predicates.controller(blocks(definition.getBlock('mod:controller')))"
        );
    }

    #[test]
    fn test_rule_symbols_order_before_auto() {
        let config = ConvertConfig {
            special_rules: vec![SpecialRule {
                symbol: "~".to_string(),
                keywords: vec!["mod:controller".to_string()],
                condition: "Predicates.controller(blocks(definition.getBlock()))".to_string(),
            }],
            ..ConvertConfig::default()
        };
        let doc = Schematic::new(
            2,
            1,
            1,
            vec![
                PaletteEntry::new("minecraft:stone", 0),
                PaletteEntry::new("mod:controller", 1),
            ],
            vec![0, 1],
        )
        .unwrap();
        let (conditions, _) = pipeline(&config, &doc);
        let symbols: Vec<&str> = conditions.iter().map(|c| c.symbol.as_str()).collect();
        // '~' sorts after 'A' lexically but leads because it is rule-reserved.
        assert_eq!(symbols, vec!["~", "A"]);
    }

    #[test]
    fn test_chain_expansion_three_or_clauses() {
        let config = ConvertConfig {
            complex_rules: vec![ComplexRule {
                symbol: "A".to_string(),
                keywords: vec!["wool".to_string()],
                condition: "Predicates.blocks(GetRegistries.getBlock('{}'))".to_string(),
                chain: vec![ChainSegment::Or {
                    or: vec![
                        SubCondition::Literal(
                            "Predicates.abilities(PartAbility.EXPORT_ITEMS)".to_string(),
                        ),
                        SubCondition::Literal(
                            "Predicates.abilities(PartAbility.IMPORT_ITEMS)".to_string(),
                        ),
                        SubCondition::Literal(
                            "Predicates.abilities(PartAbility.INPUT_ENERGY)".to_string(),
                        ),
                    ],
                }],
            }],
            ..ConvertConfig::default()
        };
        let doc = Schematic::new(
            1,
            1,
            1,
            vec![PaletteEntry::new("minecraft:cyan_wool", 0)],
            vec![0],
        )
        .unwrap();
        let (conditions, warnings) = pipeline(&config, &doc);

        assert!(warnings.is_empty());
        let expression = &conditions[0].expression;
        assert!(expression
            .starts_with("Predicates.blocks(GetRegistries.getBlock('minecraft:cyan_wool'))"));
        assert_eq!(expression.matches(".or(").count(), 3);
        assert!(expression.contains(".or(Predicates.abilities(PartAbility.EXPORT_ITEMS))"));
        assert!(expression.contains(".or(Predicates.abilities(PartAbility.IMPORT_ITEMS))"));
        assert!(expression.contains(".or(Predicates.abilities(PartAbility.INPUT_ENERGY))"));
    }

    #[test]
    fn test_unknown_glyph_warns_and_is_skipped() {
        let config = ConvertConfig::default();
        let doc = sample_doc();
        let resolved = PaletteResolver::new(&config).resolve(&doc.palette).unwrap();

        // Sabotage the table to force '?' into the layers.
        let mut table = SymbolTable::new();
        table.assign("minecraft:air", 0, SymbolTable::BLANK);
        table.assign("minecraft:stone", 1, "A");
        let projector = Projector::new(&table, Projection::default()).unwrap();
        let (layers, _) = projector.project(&doc);

        let (conditions, warnings) =
            ConditionSynthesizer::new(&config, &resolved.symbols).synthesize(&layers);

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            Warning::Synthesis { symbol } if symbol == "?"
        ));
        assert!(conditions.iter().all(|c| c.symbol != "?"));
        // Successfully resolved symbols do not warn.
        assert!(conditions.iter().any(|c| c.symbol == "A"));
    }

    #[test]
    fn test_determinism() {
        let config = ConvertConfig::default();
        let first = pipeline(&config, &sample_doc());
        let second = pipeline(&config, &sample_doc());
        assert_eq!(first, second);
    }
}
