use canopy::prelude::*;
use canopy::tree::DEFAULT_MAX_DEPTH;
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Inspect the field tree of a collection canvas document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Treat the file as a bare structure instead of a document with a `structure` field
    #[arg(long, global = true)]
    raw: bool,

    /// Deepest nesting level to expand
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the field tree
    Tree {
        /// Path to the JSON document
        path: String,
        /// Emit the tree and leaf index as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every selectable leaf field
    Leaves {
        /// Path to the JSON document
        path: String,
    },
    /// Resolve a selected key to its leaf description
    Resolve {
        /// Path to the JSON document
        path: String,
        /// The `/`-joined key of the field (`~1` for a `/` inside a name, `~0` for `~`)
        key: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let builder = TreeBuilder::builder().with_max_depth(cli.max_depth).build();
    let path = match &cli.command {
        Command::Tree { path, .. } | Command::Leaves { path } | Command::Resolve { path, .. } => {
            path.clone()
        }
    };

    let start = Instant::now();
    let canvas = load_canvas(&path, cli.raw);
    let tree = canvas.field_tree_with(&builder);
    debug!(
        nodes = tree.walk().count(),
        leaves = tree.leaf_count(),
        elapsed = ?start.elapsed(),
        "built field tree"
    );

    match cli.command {
        Command::Tree { json: true, .. } => {
            let output = serde_json::to_string_pretty(&tree)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize tree: {}", e)));
            println!("{}", output);
        }
        Command::Tree { json: false, .. } => {
            for node in tree.walk() {
                let indent = "  ".repeat(node.depth().saturating_sub(1));
                let marker = if node.is_container { "+" } else { "-" };
                println!("{}{} {} ({})", indent, marker, node.label, node.field_type);
            }
            println!("\n{} leaf field(s)", tree.leaf_count());
        }
        Command::Leaves { .. } => {
            for leaf in &tree.leaves {
                println!("{:<40} {}", leaf.key, leaf.field_type);
            }
        }
        Command::Resolve { key, .. } => match tree.resolve(&key) {
            Some(option) => {
                println!("key:   {}", option.key);
                println!("label: {}", option.label);
                println!("path:  {}", option.path.join(" > "));
                println!("type:  {}", option.field_type);
            }
            None => match tree.find_node(&key) {
                Some(node) => exit_with_error(&format!(
                    "'{}' is a {} container and cannot be selected",
                    key, node.field_type
                )),
                None => exit_with_error(&format!("No field with key '{}'", key)),
            },
        },
    }
}

fn load_canvas(path: &str, raw: bool) -> CollectionCanvas {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    let document: serde_json::Value = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)));
    info!(path, "loaded document");

    if raw {
        CollectionCanvas::from_document(path, &serde_json::json!({ "structure": document }))
    } else {
        CollectionCanvas::from_document(path, &document)
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
