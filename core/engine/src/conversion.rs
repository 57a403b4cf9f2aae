//! FILENAME: core/engine/src/conversion.rs
//! PURPOSE: Converts values between units.
//! CONTEXT: Conversion is decided in this order:
//!   1. both units are temperatures -> closed-form scale conversion
//!   2. dimensions differ           -> DimensionMismatch
//!   3. source has a formula        -> formula(x = value)
//!   4. target has a formula        -> formula(x = value * from.factor)
//!   5. otherwise                   -> value * from.factor / to.factor

use crate::config::EngineConfig;
use crate::error::ConversionError;
use crate::evaluator::Bindings;
use crate::formula::Formula;
use crate::model::{Unit, UnitSnapshot};
use crate::temperature::convert_temperature;

/// Stateless converter carrying the evaluation policies for formula units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConverter {
    config: EngineConfig,
}

impl UnitConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        UnitConverter { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn convert(
        &self,
        value: f64,
        from: &UnitSnapshot<'_>,
        to: &UnitSnapshot<'_>,
    ) -> Result<f64, ConversionError> {
        if from.is_temperature() && to.is_temperature() {
            return convert_temperature(value, from.symbol, to.symbol);
        }

        if !from.same_dimension(to) {
            return Err(ConversionError::DimensionMismatch {
                from: from.symbol.to_string(),
                to: to.symbol.to_string(),
            });
        }

        if let Some(formula) = from.conversion_formula {
            return self.eval_formula(formula, value);
        }

        let from_factor = checked_factor(from)?;

        if let Some(formula) = to.conversion_formula {
            return self.eval_formula(formula, value * from_factor);
        }

        let to_factor = checked_factor(to)?;
        Ok(value * from_factor / to_factor)
    }

    /// Converts `value` into each of `targets`, e.g. every unit of a category.
    /// Each target gets its own result; one failure does not hide the rest.
    pub fn convert_many<'u>(
        &self,
        value: f64,
        from: &UnitSnapshot<'_>,
        targets: &'u [Unit],
    ) -> Vec<(&'u Unit, Result<f64, ConversionError>)> {
        targets
            .iter()
            .map(|unit| (unit, self.convert(value, from, &unit.snapshot())))
            .collect()
    }

    fn eval_formula(&self, source: &str, x: f64) -> Result<f64, ConversionError> {
        Formula::parse_with_config(source, &self.config)
            .and_then(|formula| formula.evaluate_with_config(&Bindings::x(x), self.config))
            .map_err(|source_err| ConversionError::InvalidFormula {
                formula: source.to_string(),
                source: source_err,
            })
    }
}

fn checked_factor(unit: &UnitSnapshot<'_>) -> Result<f64, ConversionError> {
    if !unit.factor.is_finite() || unit.factor <= 0.0 {
        return Err(ConversionError::InvalidFactor {
            symbol: unit.symbol.to_string(),
            factor: unit.factor,
        });
    }
    Ok(unit.factor)
}

/// Converts with the default policies.
pub fn convert(
    value: f64,
    from: &UnitSnapshot<'_>,
    to: &UnitSnapshot<'_>,
) -> Result<f64, ConversionError> {
    UnitConverter::new().convert(value, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, FormulaError};
    use crate::model::dimension::{LENGTH, MASS, TEMPERATURE, TIME};

    fn meter() -> Unit {
        Unit::system("Meter", "m", 1.0, &[LENGTH], &[])
    }

    fn foot() -> Unit {
        Unit::system("Foot", "ft", 0.3048, &[LENGTH], &[])
    }

    fn temp(name: &str, symbol: &str) -> Unit {
        Unit::system(name, symbol, 1.0, &[TEMPERATURE], &[])
    }

    #[test]
    fn test_factor_conversion() {
        let km = Unit::system("Kilometer", "km", 1000.0, &[LENGTH], &[]);
        assert_eq!(convert(2.5, &km.snapshot(), &meter().snapshot()), Ok(2500.0));

        let feet = convert(1.0, &meter().snapshot(), &foot().snapshot()).unwrap();
        assert!((feet - 3.280839895).abs() < 1e-6);
    }

    #[test]
    fn test_factor_round_trip() {
        let mile = Unit::system("Mile", "mi", 1609.34, &[LENGTH], &[]);
        let inch = Unit::system("Inch", "in", 0.0254, &[LENGTH], &[]);
        for value in [0.0, 1.0, 42.5, -3.0, 1e9] {
            let there = convert(value, &mile.snapshot(), &inch.snapshot()).unwrap();
            let back = convert(there, &inch.snapshot(), &mile.snapshot()).unwrap();
            assert!((back - value).abs() <= value.abs() * 1e-12 + 1e-12);
        }
    }

    #[test]
    fn test_temperature_conversion() {
        let c = temp("Celsius", "°C");
        let f = temp("Fahrenheit", "°F");
        let k = temp("Kelvin", "K");
        assert_eq!(convert(0.0, &c.snapshot(), &f.snapshot()), Ok(32.0));
        assert_eq!(convert(212.0, &f.snapshot(), &c.snapshot()), Ok(100.0));
        assert_eq!(convert(0.0, &c.snapshot(), &k.snapshot()), Ok(273.15));
    }

    #[test]
    fn test_unknown_temperature_symbol() {
        let rankine = temp("Rankine", "°R");
        assert_eq!(
            convert(1.0, &rankine.snapshot(), &temp("Celsius", "°C").snapshot()),
            Err(ConversionError::UnknownTemperatureUnit("°R".to_string()))
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let second = Unit::system("Second", "s", 1.0, &[TIME], &[]);
        assert_eq!(
            convert(1.0, &meter().snapshot(), &second.snapshot()),
            Err(ConversionError::DimensionMismatch {
                from: "m".to_string(),
                to: "s".to_string(),
            })
        );

        let celsius = temp("Celsius", "°C");
        assert!(convert(1.0, &celsius.snapshot(), &meter().snapshot()).is_err());
    }

    #[test]
    fn test_dimension_order_does_not_matter() {
        let joule = UnitSnapshot::new("J", 1.0, &[MASS, LENGTH, LENGTH], &[TIME, TIME]);
        let calorie = UnitSnapshot::new("cal", 4.184, &[LENGTH, LENGTH, MASS], &[TIME, TIME]);
        assert_eq!(convert(1.0, &calorie, &joule), Ok(4.184));
    }

    #[test]
    fn test_source_formula_wins() {
        let odd = meter().with_formula("x * 3 + 1");
        // Factor arithmetic is bypassed entirely
        assert_eq!(convert(2.0, &odd.snapshot(), &foot().snapshot()), Ok(7.0));
    }

    #[test]
    fn test_target_formula_receives_base_value() {
        let km = Unit::system("Kilometer", "km", 1000.0, &[LENGTH], &[]);
        let mut half = Unit::user("Half", "h", 1.0).with_formula("x / 2");
        half.numerator = vec![LENGTH];
        assert_eq!(convert(3.0, &km.snapshot(), &half.snapshot()), Ok(1500.0));
    }

    #[test]
    fn test_formula_errors_are_wrapped() {
        let broken = meter().with_formula("x +");
        assert!(matches!(
            convert(1.0, &broken.snapshot(), &foot().snapshot()),
            Err(ConversionError::InvalidFormula {
                source: FormulaError::Parse(_),
                ..
            })
        ));

        let divides = meter().with_formula("1 / x");
        assert_eq!(
            convert(0.0, &divides.snapshot(), &foot().snapshot()),
            Err(ConversionError::InvalidFormula {
                formula: "1 / x".to_string(),
                source: FormulaError::Eval(EvalError::DivisionByZero),
            })
        );
    }

    #[test]
    fn test_invalid_factor_is_rejected() {
        let zero = Unit::system("Zero", "z", 0.0, &[LENGTH], &[]);
        assert!(matches!(
            convert(1.0, &meter().snapshot(), &zero.snapshot()),
            Err(ConversionError::InvalidFactor { factor, .. }) if factor == 0.0
        ));
        let nan = Unit::system("NaN", "n", f64::NAN, &[LENGTH], &[]);
        assert!(convert(1.0, &nan.snapshot(), &meter().snapshot()).is_err());
    }

    #[test]
    fn test_convert_many_keeps_every_result() {
        let units = vec![
            meter(),
            foot(),
            Unit::system("Broken", "b", -1.0, &[LENGTH], &[]),
        ];
        let results = UnitConverter::new().convert_many(1.0, &meter().snapshot(), &units);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0.symbol, "m");
        assert_eq!(results[0].1, Ok(1.0));
        assert!(results[1].1.is_ok());
        assert!(results[2].1.is_err());
    }
}
