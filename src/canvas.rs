use crate::error::StoreError;
use crate::store::DocumentStore;
use crate::tree::{FieldOption, FieldTree, TreeBuilder};
use crate::value::{StructureMap, structure_from_json};
use serde_json::Value;
use tracing::debug;

/// Name of the document field holding a collection canvas structure.
pub const STRUCTURE_FIELD: &str = "structure";

/// A collection canvas document as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionCanvas {
    pub id: String,
    structure: StructureMap,
}

impl CollectionCanvas {
    pub fn load(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<Self, StoreError> {
        let document = store
            .get_document(collection, id)?
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        Ok(Self::from_document(id, &document))
    }

    /// Reads only the `structure` field; a missing, null or non-object value is an empty map.
    pub fn from_document(id: impl Into<String>, document: &Value) -> Self {
        let id = id.into();
        let structure = match document.get(STRUCTURE_FIELD) {
            Some(raw) => structure_from_json(raw),
            None => {
                debug!(canvas = %id, "document has no structure field");
                StructureMap::new()
            }
        };
        Self { id, structure }
    }

    pub fn structure(&self) -> &StructureMap {
        &self.structure
    }

    pub fn field_tree(&self) -> FieldTree {
        self.field_tree_with(&TreeBuilder::default())
    }

    pub fn field_tree_with(&self, builder: &TreeBuilder) -> FieldTree {
        builder.build_tree(&self.structure)
    }

    /// Resolves a key selected in the tree widget back to its leaf description.
    pub fn resolve_selection(&self, selected_key: &str) -> Option<FieldOption> {
        self.field_tree().resolve(selected_key).cloned()
    }
}
