//! FILENAME: core/persistence/src/error.rs

use engine::{ParseError, UnitError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported library version {found}, expected at most {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Unit not found: {0}")]
    UnitNotFound(Uuid),

    #[error("Formula not found: {0}")]
    FormulaNotFound(Uuid),

    #[error("'{0}' is system-defined and cannot be changed")]
    SystemDefined(String),

    #[error("Invalid unit '{name}': {source}")]
    InvalidUnit { name: String, source: UnitError },

    #[error("Invalid formula '{name}': {source}")]
    InvalidFormula { name: String, source: ParseError },
}

pub type StoreResult<T> = Result<T, StoreError>;
