//! FILENAME: core/engine/src/model.rs
//! PURPOSE: Units, categories and the read-only unit projection used by conversion.
//! CONTEXT: A unit knows how to reach its category's base unit through a
//! multiplicative `factor`, or through a `conversion_formula` when the
//! relationship is not linear. Its physical dimension is a pair of
//! dimension-id multisets (numerator / denominator); m/s is `[1] / [2]`.

use crate::error::UnitError;
use parser::Variable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a base physical dimension.
pub type DimensionId = u32;

/// Dimension ids.
pub mod dimension {
    use super::DimensionId;

    pub const LENGTH: DimensionId = 1;
    pub const TIME: DimensionId = 2;
    pub const MASS: DimensionId = 3;
    /// Marks units converted through the closed-form temperature scales.
    pub const TEMPERATURE: DimensionId = 4;
}

// ============================================================================
// UNIT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub is_system_defined: bool,
    #[serde(default)]
    pub use_metric_prefixes: bool,
    /// How many base units one of this unit is.
    pub factor: f64,
    #[serde(default)]
    pub numerator: Vec<DimensionId>,
    #[serde(default)]
    pub denominator: Vec<DimensionId>,
    /// Formula over `x` that replaces factor arithmetic for this unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_formula: Option<String>,
}

impl Unit {
    /// A built-in unit.
    pub fn system(
        name: &str,
        symbol: &str,
        factor: f64,
        numerator: &[DimensionId],
        denominator: &[DimensionId],
    ) -> Self {
        Unit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            is_system_defined: true,
            use_metric_prefixes: false,
            factor,
            numerator: numerator.to_vec(),
            denominator: denominator.to_vec(),
            conversion_formula: None,
        }
    }

    /// A user-created unit with no dimension.
    pub fn user(name: &str, symbol: &str, factor: f64) -> Self {
        Unit {
            is_system_defined: false,
            ..Unit::system(name, symbol, factor, &[], &[])
        }
    }

    pub fn with_metric_prefixes(mut self) -> Self {
        self.use_metric_prefixes = true;
        self
    }

    pub fn with_formula(mut self, formula: &str) -> Self {
        self.conversion_formula = Some(formula.to_string());
        self
    }

    pub fn is_temperature(&self) -> bool {
        self.numerator.contains(&dimension::TEMPERATURE)
    }

    /// Borrowed view consumed by the conversion engine.
    pub fn snapshot(&self) -> UnitSnapshot<'_> {
        UnitSnapshot {
            symbol: &self.symbol,
            factor: self.factor,
            numerator: &self.numerator,
            denominator: &self.denominator,
            conversion_formula: self.conversion_formula.as_deref(),
        }
    }

    /// Checks the invariants every stored unit must satisfy.
    pub fn validate(&self) -> Result<(), UnitError> {
        if self.name.trim().is_empty() {
            return Err(UnitError::EmptyName);
        }
        if self.symbol.trim().is_empty() {
            return Err(UnitError::EmptySymbol);
        }
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(UnitError::InvalidFactor(self.factor));
        }
        if let Some(formula) = &self.conversion_formula {
            // Conversion binds only x
            let ast = parser::parse(formula)?;
            if let Some(var) = ast.variables().into_iter().find(|v| *v != Variable::X) {
                return Err(UnitError::UnsupportedVariable(var));
            }
        }
        Ok(())
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_system_defined: bool,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Category {
    pub fn system(name: &str, units: Vec<Unit>) -> Self {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_system_defined: true,
            units,
        }
    }

    /// An empty user category.
    pub fn user(name: &str) -> Self {
        Category {
            is_system_defined: false,
            ..Category::system(name, Vec::new())
        }
    }

    /// The unit every other unit converts through (`factor == 1`).
    pub fn base_unit(&self) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.factor == 1.0)
    }

    pub fn unit(&self, id: Uuid) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn unit_by_symbol(&self, symbol: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.symbol == symbol)
    }

    /// A fresh user unit for this category. It takes the dimension of the
    /// first built-in unit so it stays convertible with its siblings.
    pub fn new_unit(&self) -> Unit {
        let (numerator, denominator) = self
            .units
            .iter()
            .find(|unit| unit.is_system_defined)
            .map(|unit| (unit.numerator.clone(), unit.denominator.clone()))
            .unwrap_or_default();

        Unit {
            numerator,
            denominator,
            ..Unit::user("New Unit", "unit", 1.0)
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::user("New Category")
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// The read-only slice of a unit that conversion needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSnapshot<'a> {
    pub symbol: &'a str,
    pub factor: f64,
    pub numerator: &'a [DimensionId],
    pub denominator: &'a [DimensionId],
    pub conversion_formula: Option<&'a str>,
}

impl<'a> UnitSnapshot<'a> {
    pub fn new(
        symbol: &'a str,
        factor: f64,
        numerator: &'a [DimensionId],
        denominator: &'a [DimensionId],
    ) -> Self {
        UnitSnapshot {
            symbol,
            factor,
            numerator,
            denominator,
            conversion_formula: None,
        }
    }

    pub fn with_formula(mut self, formula: &'a str) -> Self {
        self.conversion_formula = Some(formula);
        self
    }

    pub fn is_temperature(&self) -> bool {
        self.numerator.contains(&dimension::TEMPERATURE)
    }

    /// Same dimension when numerator and denominator match as multisets.
    /// Units are not cancelled: `[1, 2] / [2]` is not length.
    pub fn same_dimension(&self, other: &UnitSnapshot<'_>) -> bool {
        same_multiset(self.numerator, other.numerator)
            && same_multiset(self.denominator, other.denominator)
    }
}

fn same_multiset(a: &[DimensionId], b: &[DimensionId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
