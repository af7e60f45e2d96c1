pub mod classify;
pub mod structure;

pub use classify::*;
pub use structure::*;
