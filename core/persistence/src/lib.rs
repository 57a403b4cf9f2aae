//! FILENAME: core/persistence/src/lib.rs
//! Vert Persistence Module
//!
//! Stores categories, units and user formulas behind the `UnitStore`
//! interface: in memory for tests and previews, or as a JSON document on disk.

mod error;
mod json;
mod library;
mod memory;
pub mod seed;
mod store;

pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use library::{Library, LIBRARY_VERSION};
pub use memory::MemoryStore;
pub use seed::{default_categories, default_formulas, seed_if_empty};
pub use store::UnitStore;
