//! # Canopy - Field Trees, Ordered Lists and Change History for Canvas Documents
//!
//! **Canopy** holds the data-side logic of a multi-canvas visual builder: the schema tree
//! shown for a collection canvas, the ordered sibling lists behind the canvas tables, and the
//! bounded change history written next to every mutation.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Document**: Read a collection canvas through any [`store::DocumentStore`].
//! 2.  **Build the Tree**: [`tree::build`] (or a configured [`tree::TreeBuilder`]) turns the
//!     nested `structure` into display nodes plus a flat index of selectable leaves. Map keys
//!     are visited in ordinal order, so the output is identical on every call.
//! 3.  **Resolve Selections**: The tree widget hands back a key; [`tree::FieldTree::resolve`]
//!     turns it into the leaf's path and type. Containers never resolve.
//! 4.  **Record Mutations**: [`history::HistoryRecorder`] writes the primary document, then
//!     appends a bounded history record, attributing it to the actor held by the injected
//!     [`session::SessionContext`].
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let store = InMemoryStore::new();
//!     let session = SessionContext::signed_in(Actor::new("u-1", "Ada"));
//!     let recorder = HistoryRecorder::default();
//!
//!     let document = json!({
//!         "name": "customers",
//!         "structure": {"address": {"city": "X", "zip": 12345}, "tags": []}
//!     });
//!     let outcome = recorder.record_mutation(
//!         &store,
//!         &session,
//!         Mutation::new("collections", "c-1", document, HistoryAction::Create),
//!     )?;
//!     assert!(outcome.history_recorded());
//!
//!     let canvas = CollectionCanvas::load(&store, "collections", "c-1")?;
//!     let tree = canvas.field_tree();
//!     assert_eq!(tree.nodes.len(), 2);
//!
//!     let zip = tree.resolve("address/zip").expect("zip is a leaf");
//!     assert_eq!(zip.field_type, FieldType::Number);
//!     assert!(tree.resolve("address").is_none());
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod error;
pub mod history;
pub mod order;
pub mod prelude;
pub mod session;
pub mod store;
pub mod tree;
pub mod value;
