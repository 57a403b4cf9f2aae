//! FILENAME: core/persistence/src/json.rs
//! PURPOSE: A `UnitStore` persisted as a pretty-printed JSON document.
//! CONTEXT: The whole library is rewritten after every successful mutation.
//! Writes go to a sibling temp file which is then renamed over the target,
//! so a crash mid-write leaves the previous document intact. The in-memory
//! copy only changes once the file write has succeeded.

use crate::error::StoreResult;
use crate::library::Library;
use crate::store::UnitStore;
use engine::{Category, CustomFormula, Unit};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct JsonFileStore {
    path: PathBuf,
    library: Library,
}

impl JsonFileStore {
    /// Opens the document at `path`. A missing file is an empty library;
    /// nothing is written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let library = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let library = Library::from_json(&json)?;
            info!(
                target: "STORE",
                "loaded {} categories and {} formulas from {:?}",
                library.categories.len(),
                library.formulas.len(),
                path
            );
            library
        } else {
            info!(target: "STORE", "no library at {:?}, starting empty", path);
            Library::new()
        };

        Ok(JsonFileStore { path, library })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Applies `change` to a copy of the library, persists the copy and only
    /// then makes it current.
    fn commit<F>(&mut self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Library) -> StoreResult<()>,
    {
        let mut next = self.library.clone();
        change(&mut next)?;
        write_library(&self.path, &next)?;
        self.library = next;
        Ok(())
    }
}

fn write_library(path: &Path, library: &Library) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = library.to_json()?;
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    fs::write(&temp, json)?;
    fs::rename(&temp, path)?;
    debug!(target: "STORE", "wrote library to {:?}", path);
    Ok(())
}

impl UnitStore for JsonFileStore {
    fn load_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.library.categories.clone())
    }

    fn category(&self, id: Uuid) -> StoreResult<Category> {
        self.library.category(id).cloned()
    }

    fn save_category(&mut self, category: Category) -> StoreResult<()> {
        self.commit(|library| library.save_category(category))
    }

    fn delete_category(&mut self, id: Uuid) -> StoreResult<()> {
        self.commit(|library| library.delete_category(id))
    }

    fn save_unit(&mut self, category_id: Uuid, unit: Unit) -> StoreResult<()> {
        self.commit(|library| library.save_unit(category_id, unit))
    }

    fn delete_unit(&mut self, category_id: Uuid, unit_id: Uuid) -> StoreResult<()> {
        self.commit(|library| library.delete_unit(category_id, unit_id))
    }

    fn load_formulas(&self) -> StoreResult<Vec<CustomFormula>> {
        Ok(self.library.formulas.clone())
    }

    fn save_formula(&mut self, formula: CustomFormula) -> StoreResult<()> {
        self.commit(|library| library.save_formula(formula))
    }

    fn delete_formula(&mut self, id: Uuid) -> StoreResult<()> {
        self.commit(|library| library.delete_formula(id))
    }

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.library.is_empty())
    }
}
