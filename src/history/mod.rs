//! Per-entity change history written next to every canvas mutation.

pub mod journal;
pub mod record;
pub mod recorder;

pub use journal::*;
pub use record::*;
pub use recorder::*;
