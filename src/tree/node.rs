use crate::value::FieldType;
use ahash::AHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single row of the rendered schema tree, either a container or a leaf.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNode {
    pub key: String,
    pub label: String,
    pub path: Vec<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub is_container: bool,
    /// Only leaves can be picked as field targets.
    pub selectable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FieldNode>>,
}

impl FieldNode {
    pub(crate) fn leaf(key: String, label: String, path: Vec<String>, field_type: FieldType) -> Self {
        Self {
            key,
            label,
            path,
            field_type,
            is_container: false,
            selectable: true,
            children: None,
        }
    }

    pub(crate) fn container(
        key: String,
        label: String,
        path: Vec<String>,
        field_type: FieldType,
        children: Vec<FieldNode>,
    ) -> Self {
        Self {
            key,
            label,
            path,
            field_type,
            is_container: true,
            selectable: false,
            children: Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_container
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[FieldNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// The addressable description of a leaf field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldOption {
    pub key: String,
    pub label: String,
    pub path: Vec<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl From<&FieldNode> for FieldOption {
    fn from(node: &FieldNode) -> Self {
        Self {
            key: node.key.clone(),
            label: node.label.clone(),
            path: node.path.clone(),
            field_type: node.field_type,
        }
    }
}

/// Flat index of every leaf in a tree, keyed by full path.
///
/// Iteration follows insertion order, which is the depth-first build order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldIndex {
    entries: Vec<FieldOption>,
    positions: AHashMap<String, usize>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option. Returns `false` and keeps the existing entry if the key is taken.
    pub fn insert(&mut self, option: FieldOption) -> bool {
        if self.positions.contains_key(&option.key) {
            return false;
        }
        self.positions.insert(option.key.clone(), self.entries.len());
        self.entries.push(option);
        true
    }

    /// Flat merge of another index into this one; keys already present are kept.
    pub fn merge(&mut self, other: FieldIndex) {
        for option in other.entries {
            self.insert(option);
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldOption> {
        self.positions.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|o| o.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldOption> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FieldIndex {
    type Item = &'a FieldOption;
    type IntoIter = std::slice::Iter<'a, FieldOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Serialized as a JSON object so the tree widget can index it by key directly.
impl Serialize for FieldIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for option in &self.entries {
            map.serialize_entry(&option.key, option)?;
        }
        map.end()
    }
}
