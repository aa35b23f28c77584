//! Java source emission for multiblock pattern builders.
//!
//! Layer data becomes `String[]` constants split across part classes of a
//! fixed size; the pattern class chains one `.aisle(...)` call per layer;
//! the `.where(...)` block binds each symbol to its synthesized predicate.

use crate::condition::Condition;
use crate::layers::{Layer, LayerSet};

/// Split a layer set into emission groups of at most `layers_per_file`.
pub fn layer_groups(layers: &LayerSet, layers_per_file: usize) -> Vec<&[Layer]> {
    if layers_per_file == 0 {
        return vec![layers.layers()];
    }
    layers.layers().chunks(layers_per_file).collect()
}

/// Emit one part class holding `LAYER_001..` constants for a group.
///
/// Layer numbering restarts at 1 in every part file; the pattern class
/// references them the same way.
pub fn layer_class(package: &str, class_name: &str, group: &[Layer]) -> String {
    let mut code = vec![
        format!("package {};", package),
        String::new(),
        format!("public class {} {{", class_name),
        String::new(),
    ];

    for (i, layer) in group.iter().enumerate() {
        code.push(format!(
            "    public static final String[] LAYER_{:03} = {{",
            i + 1
        ));
        for row in layer.rows() {
            code.push(format!("        \"{}\",", row));
        }
        code.push("    };".to_string());
        code.push(String::new());
    }

    code.push("}".to_string());
    code.join("\n")
}

/// Emit the pattern class chaining `.aisle(...)` calls over every layer.
pub fn pattern_class(
    package: &str,
    class_name: &str,
    part_prefix: &str,
    total_layers: usize,
    layers_per_file: usize,
    base_structure: &str,
) -> String {
    let per_file = if layers_per_file == 0 {
        total_layers.max(1)
    } else {
        layers_per_file
    };

    let mut code = vec![
        format!("package {};", package),
        String::new(),
        "import com.gregtechceu.gtceu.api.pattern.FactoryBlockPattern;".to_string(),
        String::new(),
        format!("public class {} {{", class_name),
        String::new(),
        format!(
            "    public static final FactoryBlockPattern PATTERN = {}",
            base_structure
        ),
    ];

    for layer_index in 0..total_layers {
        let part = layer_index / per_file + 1;
        let layer_in_part = layer_index % per_file + 1;
        code.push(format!(
            "            .aisle({}_Part{}.LAYER_{:03})",
            part_prefix, part, layer_in_part
        ));
    }

    code.push("            ;".to_string());
    code.push("}".to_string());
    code.join("\n")
}

/// Emit the `.where(...)` block for the synthesized conditions, terminated
/// by `.build();`.
pub fn where_conditions(conditions: &[Condition]) -> String {
    let mut code = Vec::with_capacity(conditions.len() + 1);
    for condition in conditions {
        code.push(format!(
            "        .where('{}', {})",
            condition.symbol, condition.expression
        ));
    }
    code.push("        .build();".to_string());
    code.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertConfig;
    use crate::layers::Projector;
    use crate::palette::PaletteResolver;
    use crate::types::{PaletteEntry, Projection, Schematic};

    fn sample_layers() -> LayerSet {
        let doc = Schematic::new(
            2,
            3,
            1,
            vec![
                PaletteEntry::new("minecraft:air", 0),
                PaletteEntry::new("minecraft:stone", 1),
            ],
            vec![0, 1, 1, 0, 1, 1],
        )
        .unwrap();
        let config = ConvertConfig::default();
        let resolved = PaletteResolver::new(&config).resolve(&doc.palette).unwrap();
        let projector = Projector::new(&resolved.symbols, Projection::default()).unwrap();
        projector.project(&doc).0
    }

    #[test]
    fn test_layer_groups_chunking() {
        let layers = sample_layers();
        assert_eq!(layers.len(), 3);
        let groups = layer_groups(&layers, 2);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn test_layer_class_numbering_restarts() {
        let layers = sample_layers();
        let groups = layer_groups(&layers, 2);
        let second = layer_class("com.example.demo", "Demo_Part2", groups[1]);

        assert!(second.starts_with("package com.example.demo;"));
        assert!(second.contains("public class Demo_Part2 {"));
        // The lone layer in part 2 is still LAYER_001.
        assert!(second.contains("LAYER_001"));
        assert!(!second.contains("LAYER_003"));
        assert!(second.contains("        \"AA\","));
    }

    #[test]
    fn test_pattern_class_references_parts() {
        let code = pattern_class(
            "com.example.demo",
            "Demo",
            "Demo",
            3,
            2,
            "FactoryBlockPattern.start()",
        );
        assert!(code.contains(".aisle(Demo_Part1.LAYER_001)"));
        assert!(code.contains(".aisle(Demo_Part1.LAYER_002)"));
        assert!(code.contains(".aisle(Demo_Part2.LAYER_001)"));
        assert!(!code.contains("LAYER_003"));
    }

    #[test]
    fn test_where_conditions_block() {
        let conditions = vec![
            Condition {
                symbol: " ".to_string(),
                expression: "Predicates.any()".to_string(),
            },
            Condition {
                symbol: "A".to_string(),
                expression: "Predicates.blocks(GetRegistries.getBlock('minecraft:stone'))"
                    .to_string(),
            },
        ];
        let code = where_conditions(&conditions);
        assert!(code.contains(".where(' ', Predicates.any())"));
        assert!(code.contains(
            ".where('A', Predicates.blocks(GetRegistries.getBlock('minecraft:stone')))"
        ));
        assert!(code.ends_with(".build();"));
    }
}
