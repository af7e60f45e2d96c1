use super::DocumentStore;
use crate::error::StoreError;
use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

type DocKey = (String, String);

/// A process-local document store, used by tests and the command-line tools.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Mutex<AHashMap<DocKey, Value>>,
    subscribers: Mutex<AHashMap<DocKey, Vec<Sender<Value>>>>,
    failing: Mutex<AHashSet<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

fn doc_key(collection: &str, id: &str) -> DocKey {
    (collection.to_string(), id.to_string())
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write or delete in `collection` fail.
    pub fn fail_writes_to(&self, collection: &str) {
        self.failing_set().insert(collection.to_string());
    }

    /// Undoes [`fail_writes_to`](Self::fail_writes_to).
    pub fn restore_writes_to(&self, collection: &str) {
        self.failing_set().remove(collection);
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    /// Number of live subscribers of a document. Disconnected ones are pruned on the next write.
    pub fn subscriber_count(&self, collection: &str, id: &str) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&doc_key(collection, id))
            .map_or(0, Vec::len)
    }

    // The set only holds collection names, so a poisoned guard is still consistent.
    fn failing_set(&self) -> MutexGuard<'_, AHashSet<String>> {
        self.failing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_writable(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing_set().contains(collection) {
            return Err(StoreError::WriteRejected {
                collection: collection.to_string(),
                message: "writes disabled".to_string(),
            });
        }
        Ok(())
    }

    fn notify(&self, key: &DocKey, document: &Value) -> Result<(), StoreError> {
        let mut subscribers = lock(&self.subscribers)?;
        if let Some(senders) = subscribers.get_mut(key) {
            senders.retain(|tx| tx.send(document.clone()).is_ok());
            trace!(
                collection = %key.0,
                id = %key.1,
                listeners = senders.len(),
                "notified subscribers"
            );
        }
        Ok(())
    }
}

impl DocumentStore for InMemoryStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let documents = lock(&self.documents)?;
        Ok(documents.get(&doc_key(collection, id)).cloned())
    }

    fn set_document(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        self.ensure_writable(collection)?;

        let key = doc_key(collection, id);
        lock(&self.documents)?.insert(key.clone(), document.clone());
        self.notify(&key, &document)
    }

    fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.ensure_writable(collection)?;

        let key = doc_key(collection, id);
        if lock(&self.documents)?.remove(&key).is_none() {
            trace!(collection, id, "delete of absent document");
        }
        self.notify(&key, &Value::Null)
    }

    fn subscribe(&self, collection: &str, id: &str) -> Result<Receiver<Value>, StoreError> {
        let (tx, rx) = mpsc::channel();
        lock(&self.subscribers)?
            .entry(doc_key(collection, id))
            .or_default()
            .push(tx);
        Ok(rx)
    }
}
