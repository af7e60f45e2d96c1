use canopy::tree::build_from_json;
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Map, Value, json};
use std::fs;

/// A CLI tool to generate random collection canvas documents for the canopy tree builder
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_canvas.json")]
    output: String,

    /// Number of fields at the root of the structure
    #[arg(long, default_value_t = 12)]
    fields: usize,

    /// Maximum nesting depth of generated maps and arrays
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Maximum number of children per generated container
    #[arg(long, default_value_t = 6)]
    width: usize,
}

const FIELD_NAMES: &[&str] = &[
    "id", "name", "email", "address", "city", "zip", "items", "price", "quantity", "tags",
    "active", "notes", "owner", "createdAt", "status", "metadata", "score", "parent",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.width == 0 {
        eprintln!("Error: --width must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating structure ({} root fields, depth {}, width up to {})...",
        cli.fields, cli.depth, cli.width
    );

    let structure = generate_map(&mut rng, cli.fields, cli.depth, cli.width);
    let tree = build_from_json(&structure);
    println!(
        "-> {} root node(s), {} node(s) total, {} leaf field(s).",
        tree.nodes.len(),
        tree.walk().count(),
        tree.leaf_count()
    );
    let document = json!({
        "name": "generated",
        "structure": structure,
    });

    fs::write(&cli.output, serde_json::to_string_pretty(&document)?)?;
    println!("Successfully wrote generated canvas to '{}'", cli.output);
    Ok(())
}

fn generate_map(rng: &mut ThreadRng, count: usize, depth: usize, width: usize) -> Value {
    let mut map = Map::new();
    for n in 0..count {
        let base = FIELD_NAMES[rng.random_range(0..FIELD_NAMES.len())];
        // Suffix keeps keys unique when the same base name is drawn twice.
        let key = if map.contains_key(base) {
            format!("{}_{}", base, n)
        } else {
            base.to_string()
        };
        map.insert(key, generate_value(rng, depth, width));
    }
    Value::Object(map)
}

fn generate_value(rng: &mut ThreadRng, depth: usize, width: usize) -> Value {
    let kinds = if depth == 0 { 4 } else { 6 };
    match rng.random_range(0..kinds) {
        0 => Value::String(format!("value-{}", rng.random_range(0..1000))),
        1 => json!(rng.random_range(0.0..10_000.0_f64).round()),
        2 => Value::Bool(rng.random_bool(0.5)),
        3 => Value::Null,
        4 => {
            let len = rng.random_range(0..=width);
            Value::Array((0..len).map(|_| generate_value(rng, depth - 1, width)).collect())
        }
        _ => {
            let len = rng.random_range(0..=width);
            generate_map(rng, len, depth - 1, width)
        }
    }
}
