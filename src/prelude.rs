//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the canopy crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use canopy::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = std::fs::read_to_string("path/to/canvas.json")?;
//! let document: serde_json::Value = serde_json::from_str(&raw)?;
//!
//! let canvas = CollectionCanvas::from_document("canvas-1", &document);
//! let tree = canvas.field_tree();
//! for leaf in &tree.leaves {
//!     println!("{} ({})", leaf.key, leaf.field_type);
//! }
//! # Ok(())
//! # }
//! ```

// Tree building
pub use crate::tree::{FieldIndex, FieldNode, FieldOption, FieldTree, TreeBuilder, build, build_from_json};
pub use crate::value::{FieldType, StructureMap, StructureValue, classify, classify_json};

// Ordered lists
pub use crate::order::{OrderedItem, OrderedList};

// History, session and storage
pub use crate::canvas::CollectionCanvas;
pub use crate::history::{
    HistoryAction, HistoryLog, HistoryPolicy, HistoryRecord, HistoryRecorder, HistoryWrite, Mutation,
    MutationOutcome,
};
pub use crate::session::{Actor, SessionContext};
pub use crate::store::{DocumentStore, InMemoryStore};

// Error types
pub use crate::error::{HistoryError, OrderError, SessionError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
