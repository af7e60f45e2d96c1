use super::{FieldIndex, FieldNode, FieldOption, FieldTree};
use crate::value::{StructureMap, StructureValue, classify};
use itertools::Itertools;
use std::borrow::Cow;
use tracing::debug;

/// Nesting depth past which container contents are no longer expanded.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Separator used to join path segments into a node key.
pub const PATH_SEPARATOR: &str = "/";

/// Escapes a raw path segment for use in a key, JSON Pointer style: `~` becomes `~0` and
/// `/` becomes `~1`. Distinct paths therefore never share a key.
pub fn escape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(['~', '/']) {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Joins raw path segments into a node key.
pub fn key_for_path(path: &[String]) -> String {
    path.iter()
        .map(|segment| escape_segment(segment))
        .join(PATH_SEPARATOR)
}

/// Converts a structure map into a display tree plus a flat index of its leaves.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    max_depth: usize,
}

pub struct TreeBuilderConfig {
    max_depth: usize,
}

impl TreeBuilderConfig {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Containers at this depth are emitted with no children. Values below 1 are raised to 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn build(self) -> TreeBuilder {
        TreeBuilder {
            max_depth: self.max_depth,
        }
    }
}

impl Default for TreeBuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilderConfig::new().build()
    }
}

/// One child entry of a container, before classification.
struct Entry<'v> {
    segment: String,
    label: String,
    value: &'v StructureValue,
}

impl TreeBuilder {
    pub fn builder() -> TreeBuilderConfig {
        TreeBuilderConfig::new()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Builds the tree for a root structure. The root itself is not a node.
    pub fn build_tree(&self, structure: &StructureMap) -> FieldTree {
        self.build_branch(Self::map_entries(structure), &[])
    }

    fn build_branch<'v>(
        &self,
        entries: impl Iterator<Item = Entry<'v>>,
        path: &[String],
    ) -> FieldTree {
        let mut nodes = Vec::new();
        let mut leaves = FieldIndex::new();

        for entry in entries {
            let mut next_path = path.to_vec();
            next_path.push(entry.segment);
            let key = key_for_path(&next_path);
            let field_type = classify(entry.value);

            if field_type.is_container() {
                let children = if next_path.len() >= self.max_depth {
                    if entry.value.child_count() > 0 {
                        debug!(
                            key = %key,
                            max_depth = self.max_depth,
                            "field tree depth limit reached; children not expanded"
                        );
                    }
                    Vec::new()
                } else {
                    let branch = self.build_branch(Self::child_entries(entry.value), &next_path);
                    leaves.merge(branch.leaves);
                    branch.nodes
                };
                nodes.push(FieldNode::container(
                    key,
                    entry.label,
                    next_path,
                    field_type,
                    children,
                ));
            } else {
                let node = FieldNode::leaf(key, entry.label, next_path, field_type);
                if !leaves.insert(FieldOption::from(&node)) {
                    debug!(key = %node.key, "duplicate leaf key; first entry kept");
                }
                nodes.push(node);
            }
        }

        FieldTree { nodes, leaves }
    }

    /// Map entries in ordinal key order, so output never depends on insertion order.
    fn map_entries(map: &StructureMap) -> impl Iterator<Item = Entry<'_>> {
        map.iter()
            .sorted_unstable_by(|a, b| a.0.cmp(b.0))
            .map(|(key, value)| Entry {
                segment: key.clone(),
                label: key.clone(),
                value,
            })
    }

    fn child_entries(value: &StructureValue) -> Box<dyn Iterator<Item = Entry<'_>> + '_> {
        match value {
            StructureValue::Map(map) => Box::new(Self::map_entries(map)),
            StructureValue::Array(items) => {
                Box::new(items.iter().enumerate().map(|(index, value)| Entry {
                    segment: index.to_string(),
                    label: format!("[{}]", index),
                    value,
                }))
            }
            _ => Box::new(std::iter::empty()),
        }
    }
}
