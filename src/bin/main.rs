//! Schematic Pattern CLI
//!
//! Convert structure files into multiblock pattern sources.

use clap::{Parser, Subcommand};
use schematic_pattern::{
    emit, load_schematic, ConvertConfig, Converter, PaletteResolver, Projection,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "schematic-pattern")]
#[command(author, version, about = "Convert structure files into multiblock pattern sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a structure file into pattern sources
    Convert {
        /// Input structure file (.schem binary or textual dump)
        #[arg(short, long)]
        input: PathBuf,

        /// JSON configuration file (rule tables, alphabet, projection)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output root directory
        #[arg(short, long, default_value = "multiblock")]
        output: PathBuf,

        /// Java package for the generated classes
        #[arg(short, long, default_value = "com.example.multiblock")]
        package: String,

        /// Class name prefix
        #[arg(long, default_value = "Structure")]
        class_prefix: String,

        /// Maximum layers per part file
        #[arg(long, default_value = "100")]
        layers_per_file: usize,

        /// Base builder expression the pattern starts from
        #[arg(long, default_value = "FactoryBlockPattern.start()")]
        base_structure: String,

        /// Use the rotated projection (layers along the width axis)
        #[arg(long)]
        rotated: bool,
    },

    /// Show information about a structure file
    Info {
        /// Input structure file (.schem binary or textual dump)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            config,
            output,
            package,
            class_prefix,
            layers_per_file,
            base_structure,
            rotated,
        } => convert(
            &input,
            config.as_deref(),
            &output,
            &package,
            &class_prefix,
            layers_per_file,
            &base_structure,
            rotated,
        ),
        Commands::Info { input } => info(&input),
    }
}

fn convert(
    input: &Path,
    config_path: Option<&Path>,
    output_root: &Path,
    package: &str,
    class_prefix: &str,
    layers_per_file: usize,
    base_structure: &str,
    rotated: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => {
            println!("Loading configuration from {:?}...", path);
            ConvertConfig::from_path(path)?
        }
        None => ConvertConfig::default(),
    };
    if rotated {
        config.projection = Projection::rotated();
    }

    println!("Loading structure from {:?}...", input);
    let doc = load_schematic(input)?;
    println!(
        "  Dimensions: {}x{}x{} ({} blocks, {} palette entries)",
        doc.width,
        doc.length,
        doc.height,
        doc.volume(),
        doc.palette.len()
    );

    let converter = Converter::with_config(config)?;
    let conversion = converter.convert(&doc)?;
    println!(
        "  Resolved {} symbols across {} layers",
        conversion.symbols.len(),
        conversion.layers.len()
    );

    let structure_name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "structure".to_string());
    let out_dir = output_root.join(&structure_name);
    fs::create_dir_all(&out_dir)?;

    let groups = emit::layer_groups(&conversion.layers, layers_per_file);
    for (i, group) in groups.iter().enumerate() {
        let class_name = format!("{}_Part{}", class_prefix, i + 1);
        let code = emit::layer_class(package, &class_name, group);
        let path = out_dir.join(format!("{}.java", class_name));
        fs::write(&path, code)?;
        println!("Wrote {:?}", path);
    }

    let pattern = emit::pattern_class(
        package,
        class_prefix,
        class_prefix,
        conversion.layers.len(),
        layers_per_file,
        base_structure,
    );
    let pattern_path = out_dir.join(format!("{}.java", class_prefix));
    fs::write(&pattern_path, pattern)?;
    println!("Wrote {:?}", pattern_path);

    let conditions = emit::where_conditions(&conversion.conditions);
    let conditions_path = out_dir.join(format!("{}_WhereConditions.txt", class_prefix));
    fs::write(&conditions_path, conditions)?;
    println!("Wrote {:?}", conditions_path);

    if conversion.warnings.is_empty() {
        println!("Done.");
    } else {
        println!("Done with {} warning(s):", conversion.warnings.len());
        for warning in &conversion.warnings {
            eprintln!("  warning: {}", warning);
        }
    }

    Ok(())
}

fn info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading structure from {:?}...", input);
    let doc = load_schematic(input)?;

    println!("\nStructure Info:");
    println!("  Width:  {}", doc.width);
    println!("  Length: {}", doc.length);
    println!("  Height: {}", doc.height);
    println!("  Blocks: {}", doc.volume());
    println!("  Palette entries: {}", doc.palette.len());

    let config = ConvertConfig::default();
    let resolved = PaletteResolver::new(&config).resolve(&doc.palette)?;
    println!("\nSymbol table ({} entries):", resolved.symbols.len());
    for (name, symbol) in resolved.symbols.iter() {
        println!("  '{}' <- {}", symbol, name);
    }
    if !resolved.remap.is_empty() {
        println!("\nMerged duplicate entries: {}", resolved.remap.len());
    }

    Ok(())
}
