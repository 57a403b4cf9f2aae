//! FILENAME: core/engine/src/config.rs
//! PURPOSE: Evaluation policies and limits.
//! CONTEXT: Hosts may deserialize an `EngineConfig` from their settings file;
//! every field has a default, so an empty object is a valid configuration.

use parser::{ParserOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

/// What dividing by zero produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionByZero {
    /// Fail with `EvalError::DivisionByZero`.
    Error,
    /// Follow IEEE-754: +/-Infinity, or NaN for 0/0.
    Ieee754,
}

impl Default for DivisionByZero {
    fn default() -> Self {
        DivisionByZero::Error
    }
}

/// What a variable without a bound value evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnboundVariables {
    /// Fail with `EvalError::UnboundVariable`.
    Error,
    /// Treat the variable as 0.
    Zero,
}

impl Default for UnboundVariables {
    fn default() -> Self {
        UnboundVariables::Error
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Engine-wide configuration shared by parsing, evaluation and conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cap on formula nesting and AST height.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub division_by_zero: DivisionByZero,

    #[serde(default)]
    pub unbound_variables: UnboundVariables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            division_by_zero: DivisionByZero::default(),
            unbound_variables: UnboundVariables::default(),
        }
    }
}

impl EngineConfig {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_depth: self.max_depth,
        }
    }
}
