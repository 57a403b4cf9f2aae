//! FILENAME: core/persistence/src/memory.rs
//! PURPOSE: A `UnitStore` that lives only as long as the process.

use crate::error::StoreResult;
use crate::library::Library;
use crate::store::UnitStore;
use engine::{Category, CustomFormula, Unit};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    library: Library,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_library(library: Library) -> Self {
        MemoryStore { library }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }
}

impl UnitStore for MemoryStore {
    fn load_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.library.categories.clone())
    }

    fn category(&self, id: Uuid) -> StoreResult<Category> {
        self.library.category(id).cloned()
    }

    fn save_category(&mut self, category: Category) -> StoreResult<()> {
        self.library.save_category(category)
    }

    fn delete_category(&mut self, id: Uuid) -> StoreResult<()> {
        self.library.delete_category(id)
    }

    fn save_unit(&mut self, category_id: Uuid, unit: Unit) -> StoreResult<()> {
        self.library.save_unit(category_id, unit)
    }

    fn delete_unit(&mut self, category_id: Uuid, unit_id: Uuid) -> StoreResult<()> {
        self.library.delete_unit(category_id, unit_id)
    }

    fn load_formulas(&self) -> StoreResult<Vec<CustomFormula>> {
        Ok(self.library.formulas.clone())
    }

    fn save_formula(&mut self, formula: CustomFormula) -> StoreResult<()> {
        self.library.save_formula(formula)
    }

    fn delete_formula(&mut self, id: Uuid) -> StoreResult<()> {
        self.library.delete_formula(id)
    }

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.library.is_empty())
    }
}
