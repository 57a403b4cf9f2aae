//! FILENAME: core/persistence/src/library.rs
//! PURPOSE: The stored document: every category, unit and user formula.
//! CONTEXT: Both store implementations keep a `Library` and route every
//! mutation through it, so validation and the system-defined rules are
//! identical whether the data lives in memory or on disk. A mutation either
//! applies completely or returns an error and leaves the library untouched.

use crate::error::{StoreError, StoreResult};
use engine::{Category, CustomFormula, Unit};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version written into new documents.
pub const LIBRARY_VERSION: u32 = 1;

fn current_version() -> u32 {
    LIBRARY_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub formulas: Vec<CustomFormula>,
}

impl Default for Library {
    fn default() -> Self {
        Library {
            version: LIBRARY_VERSION,
            categories: Vec::new(),
            formulas: Vec::new(),
        }
    }
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no category has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        let library: Library = serde_json::from_str(json)?;
        if library.version > LIBRARY_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: library.version,
                supported: LIBRARY_VERSION,
            });
        }
        // Hand-edited files can carry units a save would have refused
        for category in &library.categories {
            for unit in &category.units {
                check_unit(unit)?;
            }
        }
        Ok(library)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // CATEGORIES
    // ========================================================================

    pub fn category(&self, id: Uuid) -> StoreResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(StoreError::CategoryNotFound(id))
    }

    fn category_mut(&mut self, id: Uuid) -> StoreResult<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::CategoryNotFound(id))
    }

    /// Inserts a new category or replaces a user category with the same id.
    pub fn save_category(&mut self, category: Category) -> StoreResult<()> {
        for unit in &category.units {
            check_unit(unit)?;
        }

        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) if existing.is_system_defined => {
                Err(system_defined(&existing.name))
            }
            Some(existing) => {
                debug!(
                    target: "STORE",
                    "replace category id={} name={}",
                    category.id,
                    category.name
                );
                *existing = category;
                Ok(())
            }
            None => {
                debug!(
                    target: "STORE",
                    "insert category id={} name={} units={}",
                    category.id,
                    category.name,
                    category.units.len()
                );
                self.categories.push(category);
                Ok(())
            }
        }
    }

    /// Removes a user category together with all of its units.
    pub fn delete_category(&mut self, id: Uuid) -> StoreResult<()> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::CategoryNotFound(id))?;

        if self.categories[index].is_system_defined {
            return Err(system_defined(&self.categories[index].name));
        }

        let removed = self.categories.remove(index);
        debug!(
            target: "STORE",
            "delete category id={} units_removed={}",
            id,
            removed.units.len()
        );
        Ok(())
    }

    // ========================================================================
    // UNITS
    // ========================================================================

    /// Adds `unit` to a category, or replaces the user unit with the same id.
    /// User units may be added to system categories.
    pub fn save_unit(&mut self, category_id: Uuid, unit: Unit) -> StoreResult<()> {
        check_unit(&unit)?;
        let category = self.category_mut(category_id)?;

        match category.units.iter().position(|u| u.id == unit.id) {
            Some(index) if category.units[index].is_system_defined => {
                Err(system_defined(&category.units[index].name))
            }
            Some(index) => {
                debug!(target: "STORE", "replace unit id={} category_id={}", unit.id, category_id);
                category.units[index] = unit;
                Ok(())
            }
            None => {
                debug!(
                    target: "STORE",
                    "insert unit id={} symbol={} category_id={}",
                    unit.id,
                    unit.symbol,
                    category_id
                );
                category.units.push(unit);
                Ok(())
            }
        }
    }

    pub fn delete_unit(&mut self, category_id: Uuid, unit_id: Uuid) -> StoreResult<()> {
        let category = self.category_mut(category_id)?;
        let index = category
            .units
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or(StoreError::UnitNotFound(unit_id))?;

        if category.units[index].is_system_defined {
            return Err(system_defined(&category.units[index].name));
        }

        category.units.remove(index);
        debug!(target: "STORE", "delete unit id={} category_id={}", unit_id, category_id);
        Ok(())
    }

    // ========================================================================
    // FORMULAS
    // ========================================================================

    /// Inserts or replaces a formula. The formula text must parse.
    pub fn save_formula(&mut self, formula: CustomFormula) -> StoreResult<()> {
        if let Err(source) = engine::parse(&formula.formula) {
            warn!(target: "STORE", "rejected formula name={}: {}", formula.name, source);
            return Err(StoreError::InvalidFormula {
                name: formula.name,
                source,
            });
        }

        match self.formulas.iter_mut().find(|f| f.id == formula.id) {
            Some(existing) => {
                debug!(target: "STORE", "replace formula id={}", formula.id);
                *existing = formula;
            }
            None => {
                debug!(target: "STORE", "insert formula id={} name={}", formula.id, formula.name);
                self.formulas.push(formula);
            }
        }
        Ok(())
    }

    pub fn delete_formula(&mut self, id: Uuid) -> StoreResult<()> {
        let index = self
            .formulas
            .iter()
            .position(|f| f.id == id)
            .ok_or(StoreError::FormulaNotFound(id))?;
        self.formulas.remove(index);
        debug!(target: "STORE", "delete formula id={}", id);
        Ok(())
    }
}

fn check_unit(unit: &Unit) -> StoreResult<()> {
    unit.validate().map_err(|source| {
        warn!(target: "STORE", "rejected unit name={}: {}", unit.name, source);
        StoreError::InvalidUnit {
            name: unit.name.clone(),
            source,
        }
    })
}

fn system_defined(name: &str) -> StoreError {
    warn!(target: "STORE", "refused to modify system-defined '{}'", name);
    StoreError::SystemDefined(name.to_string())
}
