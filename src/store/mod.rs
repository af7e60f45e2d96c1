use crate::error::StoreError;
use serde_json::Value;
use std::sync::mpsc::Receiver;

mod memory;

pub use memory::InMemoryStore;

/// Access to the document database backing the canvases.
///
/// Documents are addressed by collection name and id and carry arbitrary JSON bodies.
pub trait DocumentStore: Send + Sync {
    /// Returns `Ok(None)` when the document does not exist.
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Creates or fully replaces a document.
    fn set_document(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    /// Removes a document. Deleting an absent document is not an error; subscribers
    /// receive `Value::Null`.
    fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Delivers every subsequent write of the document to the returned receiver.
    fn subscribe(&self, collection: &str, id: &str) -> Result<Receiver<Value>, StoreError>;
}
