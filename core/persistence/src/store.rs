//! FILENAME: core/persistence/src/store.rs
//! PURPOSE: The repository interface hosts implement to hold units and formulas.
//! CONTEXT: The engine only ever sees snapshots; a store hands out owned
//! copies of categories and formulas and validates everything it accepts.

use crate::error::StoreResult;
use engine::{Category, CustomFormula, Unit};
use uuid::Uuid;

pub trait UnitStore {
    fn load_categories(&self) -> StoreResult<Vec<Category>>;

    fn category(&self, id: Uuid) -> StoreResult<Category>;

    /// Inserts a category, or replaces a user category with the same id.
    fn save_category(&mut self, category: Category) -> StoreResult<()>;

    /// Deletes a user category and every unit it owns.
    fn delete_category(&mut self, id: Uuid) -> StoreResult<()>;

    /// Inserts a unit into a category, or replaces a user unit with the same id.
    fn save_unit(&mut self, category_id: Uuid, unit: Unit) -> StoreResult<()>;

    fn delete_unit(&mut self, category_id: Uuid, unit_id: Uuid) -> StoreResult<()>;

    fn load_formulas(&self) -> StoreResult<Vec<CustomFormula>>;

    fn save_formula(&mut self, formula: CustomFormula) -> StoreResult<()>;

    fn delete_formula(&mut self, id: Uuid) -> StoreResult<()>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.load_categories()?.is_empty())
    }
}
