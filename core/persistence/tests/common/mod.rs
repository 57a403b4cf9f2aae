//! FILENAME: tests/common/mod.rs
//! Test harness for store integration tests.

#![allow(dead_code)]

use engine::Category;
use persistence::{seed_if_empty, JsonFileStore, MemoryStore, UnitStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// A JSON store in a throwaway directory. The directory lives as long as
/// the harness.
pub struct TestHarness {
    pub dir: TempDir,
    pub store: JsonFileStore,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("library.json")).unwrap();
        TestHarness { dir, store }
    }

    pub fn seeded() -> Self {
        let mut harness = Self::new();
        assert!(seed_if_empty(&mut harness.store).unwrap());
        harness
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("library.json")
    }

    /// Re-opens the document from disk.
    pub fn reopen(&self) -> JsonFileStore {
        JsonFileStore::open(self.path()).unwrap()
    }

    pub fn category_named(&self, name: &str) -> Category {
        find_category(&self.store, name)
    }
}

pub fn seeded_memory_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    seed_if_empty(&mut store).unwrap();
    store
}

pub fn find_category<S: UnitStore>(store: &S, name: &str) -> Category {
    store
        .load_categories()
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no category {}", name))
}
