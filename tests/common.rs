//! Common test utilities for building canvas structures and stores.
use canopy::prelude::*;
use serde_json::{Value, json};

/// A customer collection structure with nested maps, arrays and every leaf type.
#[allow(dead_code)]
pub fn customer_structure() -> Value {
    json!({
        "name": "Ada",
        "age": 36,
        "active": true,
        "nickname": null,
        "address": {"city": "X", "zip": 12345},
        "items": [
            {"sku": "A-1", "price": 9.5},
            {"sku": "B-2", "price": 12.0}
        ],
        "tags": []
    })
}

/// Wraps a structure the way collection canvas documents are persisted.
#[allow(dead_code)]
pub fn canvas_document(structure: Value) -> Value {
    json!({
        "name": "customers",
        "structure": structure,
    })
}

#[allow(dead_code)]
pub fn signed_in_session() -> SessionContext {
    SessionContext::signed_in(Actor::new("u-1", "Ada Lovelace").with_email("ada@example.com"))
}

/// A store pre-populated with one collection canvas under `collections/c-1`.
#[allow(dead_code)]
pub fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .set_document("collections", "c-1", canvas_document(customer_structure()))
        .expect("seeding an in-memory store cannot fail");
    store
}

/// A minimal API-operation row for ordered list tests.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Operation {
    pub name: String,
}

#[allow(dead_code)]
pub fn operation(name: &str) -> Operation {
    Operation {
        name: name.to_string(),
    }
}
