//! FILENAME: core/engine/src/error.rs
//! PURPOSE: Error types for evaluation, formulas, unit validation and conversion.
//! CONTEXT: Every failure the engine can hit on user input is one of these
//! values. None of them are fatal; callers decide how to present them.

use parser::{ParseError, Variable};
use thiserror::Error;

/// Failures while walking an AST.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Variable '{0}' has no value")]
    UnboundVariable(Variable),

    #[error("Unknown variable '{0}', expected x, y or z")]
    UnknownVariable(String),

    #[error("{function}() cannot take {got} arguments")]
    ArgumentCount { function: &'static str, got: usize },

    #[error("Expression is deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

impl EvalError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::DomainError(msg.into())
    }
}

/// Either half of the parse + evaluate pipeline failing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Problems with a unit definition, caught before it is stored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Factor must be a positive finite number, got {0}")]
    InvalidFactor(f64),

    #[error("Invalid conversion formula: {0}")]
    InvalidFormula(#[from] ParseError),

    #[error("Conversion formula may only use x, found '{0}'")]
    UnsupportedVariable(Variable),

    #[error("Unit name must not be empty")]
    EmptyName,

    #[error("Unit symbol must not be empty")]
    EmptySymbol,
}

/// Failures converting a value between two units.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Cannot convert '{from}' to '{to}': dimensions differ")]
    DimensionMismatch { from: String, to: String },

    #[error("Invalid formula '{formula}': {source}")]
    InvalidFormula {
        formula: String,
        source: FormulaError,
    },

    #[error("Unit '{symbol}' has invalid factor {factor}")]
    InvalidFactor { symbol: String, factor: f64 },

    #[error("Unknown temperature unit '{0}'")]
    UnknownTemperatureUnit(String),
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
