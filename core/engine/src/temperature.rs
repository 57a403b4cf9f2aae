//! FILENAME: core/engine/src/temperature.rs
//! PURPOSE: Closed-form conversion between the temperature scales.
//! CONTEXT: Temperature scales have offsets, so they cannot share a base
//! unit through a factor. Every conversion goes through Celsius instead.

use crate::error::ConversionError;

/// A supported temperature scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Resolves a unit symbol to its scale.
    pub fn from_symbol(symbol: &str) -> Result<Self, ConversionError> {
        match symbol {
            "°C" => Ok(TemperatureScale::Celsius),
            "°F" => Ok(TemperatureScale::Fahrenheit),
            "K" => Ok(TemperatureScale::Kelvin),
            other => Err(ConversionError::UnknownTemperatureUnit(other.to_string())),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
        }
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }
}

/// Converts `value` between two temperature symbols.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let from = TemperatureScale::from_symbol(from)?;
    let to = TemperatureScale::from_symbol(to)?;
    if from == to {
        return Ok(value);
    }
    Ok(to.from_celsius(from.to_celsius(value)))
}
