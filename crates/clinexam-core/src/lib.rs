//! clinexam-core
//!
//! Pure domain types for the examination engine: the observation snapshot,
//! the field-path vocabulary, and the value types every recomputation
//! returns. No scoring logic lives here.

pub mod error;
pub mod fields;
pub mod models;
pub mod snapshot;

pub use snapshot::{BoundedNumber, Category, Leaf, Node, Snapshot};
