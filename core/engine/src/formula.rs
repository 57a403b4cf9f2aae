//! FILENAME: core/engine/src/formula.rs
//! PURPOSE: Compiled formulas, user formula records and the built-in presets.
//! CONTEXT: A `Formula` keeps its source text next to the parsed AST so it
//! can be evaluated many times without re-parsing. `CustomFormula` is the
//! stored record a user names and saves.

use crate::config::EngineConfig;
use crate::error::FormulaError;
use crate::evaluator::{Bindings, Evaluator};
use parser::{parse_with_options, Expression};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A parsed formula ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    ast: Expression,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        Self::parse_with_config(source, &EngineConfig::default())
    }

    pub fn parse_with_config(source: &str, config: &EngineConfig) -> Result<Self, FormulaError> {
        let ast = parse_with_options(source, config.parser_options())?;
        Ok(Formula {
            source: source.to_string(),
            ast,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expression {
        &self.ast
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, FormulaError> {
        self.evaluate_with_config(bindings, EngineConfig::default())
    }

    pub fn evaluate_with_config(
        &self,
        bindings: &Bindings,
        config: EngineConfig,
    ) -> Result<f64, FormulaError> {
        Ok(Evaluator::with_config(bindings, config).evaluate(&self.ast)?)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Parses and evaluates `source` in one step.
pub fn evaluate_formula(source: &str, bindings: &Bindings) -> Result<f64, FormulaError> {
    Formula::parse(source)?.evaluate(bindings)
}

// ============================================================================
// USER FORMULAS
// ============================================================================

/// A named formula saved by the user, e.g. "°F → °C" = "(x - 32) * 5/9".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFormula {
    pub id: Uuid,
    pub name: String,
    /// Display label.
    pub symbol: String,
    pub formula: String,
}

impl CustomFormula {
    pub fn new(name: &str, symbol: &str, formula: &str) -> Self {
        CustomFormula {
            id: Uuid::new_v4(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            formula: formula.to_string(),
        }
    }

    /// A formula of the form `x * scale (+|-) offset`.
    pub fn linear(name: &str, symbol: &str, scale: f64, offset: f64) -> Self {
        Self::new(name, symbol, &linear_formula(scale, offset))
    }

    /// Evaluates the formula with `x = value`.
    pub fn evaluate(&self, value: f64) -> Result<f64, FormulaError> {
        self.evaluate_with(&Bindings::x(value))
    }

    pub fn evaluate_with(&self, bindings: &Bindings) -> Result<f64, FormulaError> {
        evaluate_formula(&self.formula, bindings)
    }

    pub fn compile(&self) -> Result<Formula, FormulaError> {
        Formula::parse(&self.formula)
    }
}

/// Builds `x * scale`, followed by `+ offset` or `- |offset|` unless the
/// offset is zero.
pub fn linear_formula(scale: f64, offset: f64) -> String {
    let mut formula = format!("x * {}", scale);
    if offset > 0.0 {
        formula.push_str(&format!(" + {}", offset));
    } else if offset < 0.0 {
        formula.push_str(&format!(" - {}", offset.abs()));
    }
    formula
}

// ============================================================================
// PRESETS
// ============================================================================

/// The temperature formulas offered when creating a new formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperaturePreset {
    CelsiusToFahrenheit,
    FahrenheitToCelsius,
    CelsiusToKelvin,
    KelvinToCelsius,
}

impl TemperaturePreset {
    pub const ALL: [TemperaturePreset; 4] = [
        TemperaturePreset::CelsiusToFahrenheit,
        TemperaturePreset::FahrenheitToCelsius,
        TemperaturePreset::CelsiusToKelvin,
        TemperaturePreset::KelvinToCelsius,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemperaturePreset::CelsiusToFahrenheit => "Celsius to Fahrenheit",
            TemperaturePreset::FahrenheitToCelsius => "Fahrenheit to Celsius",
            TemperaturePreset::CelsiusToKelvin => "Celsius to Kelvin",
            TemperaturePreset::KelvinToCelsius => "Kelvin to Celsius",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperaturePreset::CelsiusToFahrenheit => "°C → °F",
            TemperaturePreset::FahrenheitToCelsius => "°F → °C",
            TemperaturePreset::CelsiusToKelvin => "°C → K",
            TemperaturePreset::KelvinToCelsius => "K → °C",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            TemperaturePreset::CelsiusToFahrenheit => "x * 9/5 + 32",
            TemperaturePreset::FahrenheitToCelsius => "(x - 32) * 5/9",
            TemperaturePreset::CelsiusToKelvin => "x + 273.15",
            TemperaturePreset::KelvinToCelsius => "x - 273.15",
        }
    }

    pub fn to_custom_formula(&self) -> CustomFormula {
        CustomFormula::new(self.name(), self.symbol(), self.formula())
    }
}
