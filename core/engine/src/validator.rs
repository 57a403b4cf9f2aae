//! FILENAME: core/engine/src/validator.rs
//! PURPOSE: Checks whether a user-entered formula is usable.
//! CONTEXT: Run before a formula is saved. A formula is valid when it parses
//! and evaluates without error with every variable set to 1.

use crate::error::FormulaError;
use crate::evaluator::Bindings;
use crate::formula::evaluate_formula;

pub fn validate_formula(formula: &str) -> Result<(), FormulaError> {
    evaluate_formula(formula, &Bindings::xyz(1.0, 1.0, 1.0)).map(|_| ())
}

pub fn is_valid_formula(formula: &str) -> bool {
    validate_formula(formula).is_ok()
}
