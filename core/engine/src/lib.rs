//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the conversion and formula engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! Everything here is synchronous and pure; hosts own storage and I/O.

pub mod config;
pub mod conversion;
pub mod error;
pub mod evaluator;
pub mod formula;
mod functions;
pub mod model;
pub mod prefix;
pub mod temperature;
pub mod validator;

// Re-export commonly used types at the crate root
pub use config::{DivisionByZero, EngineConfig, UnboundVariables};
pub use conversion::{convert, UnitConverter};
pub use error::{ConversionError, EvalError, EvalResult, FormulaError, UnitError};
pub use evaluator::{evaluate, evaluate_with_config, Bindings, Evaluator};
pub use formula::{evaluate_formula, linear_formula, CustomFormula, Formula, TemperaturePreset};
pub use model::{dimension, Category, DimensionId, Unit, UnitSnapshot};
pub use prefix::{MetricPrefix, METRIC_PREFIXES};
pub use temperature::{convert_temperature, TemperatureScale};
pub use validator::{is_valid_formula, validate_formula};

pub use parser::{parse, Expression, ParseError, ParseErrorKind, Variable};
