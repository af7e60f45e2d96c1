//! Hierarchical field tree for collection canvas structures.
//!
//! The tree mirrors the nested structure: one [`FieldNode`] per map entry or array member,
//! with containers (maps and arrays) holding their children and leaves carrying a
//! [`FieldOption`] in the flat [`FieldIndex`]. Map keys are visited in ordinal order, so the
//! same structure always yields the same node order and the same keys. The tree widget
//! relies on that to keep selection state across re-renders.
//!
//! ```rust
//! use canopy::tree::build_from_json;
//! use serde_json::json;
//!
//! let tree = build_from_json(&json!({"b": 1, "a": {"city": "X"}}));
//! let keys: Vec<_> = tree.nodes.iter().map(|n| n.key.as_str()).collect();
//! assert_eq!(keys, ["a", "b"]);
//! assert!(tree.resolve("a/city").is_some());
//! assert!(tree.resolve("a").is_none());
//! ```

mod builder;
mod node;

pub use builder::{
    DEFAULT_MAX_DEPTH, PATH_SEPARATOR, TreeBuilder, TreeBuilderConfig, escape_segment, key_for_path,
};
pub use node::{FieldIndex, FieldNode, FieldOption};

use crate::value::{StructureMap, structure_from_json};
use serde::Serialize;

/// The output of a tree build: root-level nodes plus the flat leaf index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldTree {
    pub nodes: Vec<FieldNode>,
    pub leaves: FieldIndex,
}

impl FieldTree {
    /// Resolves a key selected in the tree widget. Containers never resolve.
    pub fn resolve(&self, selected_key: &str) -> Option<&FieldOption> {
        self.leaves.get(selected_key)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Finds any node, container or leaf, by its full key.
    pub fn find_node(&self, key: &str) -> Option<&FieldNode> {
        self.walk().find(|node| node.key == key)
    }

    /// Pre-order traversal over every node in the tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.nodes.iter().rev().collect(),
        }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a FieldNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a FieldNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Builds a field tree with the default builder settings.
pub fn build(structure: &StructureMap) -> FieldTree {
    TreeBuilder::default().build_tree(structure)
}

/// Builds a field tree straight from a JSON document body. Non-objects yield an empty tree.
pub fn build_from_json(structure: &serde_json::Value) -> FieldTree {
    build(&structure_from_json(structure))
}
