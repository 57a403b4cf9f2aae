//! FILENAME: tests/common/mod.rs
//! Fixtures for engine integration tests.

#![allow(dead_code)]

use engine::dimension::{LENGTH, MASS, TEMPERATURE, TIME};
use engine::{Category, Unit, UnitConverter, UnitSnapshot};

/// A small set of categories with the factors the app ships with.
pub struct TestHarness {
    pub categories: Vec<Category>,
    pub converter: UnitConverter,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            categories: vec![distance(), time(), temperature(), energy()],
            converter: UnitConverter::new(),
        }
    }

    pub fn category(&self, name: &str) -> &Category {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no category {}", name))
    }

    /// Looks a unit up by symbol across all categories.
    pub fn unit(&self, symbol: &str) -> &Unit {
        self.categories
            .iter()
            .find_map(|c| c.unit_by_symbol(symbol))
            .unwrap_or_else(|| panic!("no unit {}", symbol))
    }

    pub fn snapshot(&self, symbol: &str) -> UnitSnapshot<'_> {
        self.unit(symbol).snapshot()
    }

    pub fn convert(
        &self,
        value: f64,
        from: &str,
        to: &str,
    ) -> Result<f64, engine::ConversionError> {
        self.converter
            .convert(value, &self.snapshot(from), &self.snapshot(to))
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = expected.abs().max(1.0) * 1e-9;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn distance() -> Category {
    Category::system(
        "Distance",
        vec![
            Unit::system("Meter", "m", 1.0, &[LENGTH], &[]).with_metric_prefixes(),
            Unit::system("Kilometer", "km", 1000.0, &[LENGTH], &[]),
            Unit::system("Mile", "mi", 1609.34, &[LENGTH], &[]),
            Unit::system("Foot", "ft", 0.3048, &[LENGTH], &[]),
            Unit::system("Inch", "in", 0.0254, &[LENGTH], &[]),
        ],
    )
}

fn time() -> Category {
    Category::system(
        "Time",
        vec![
            Unit::system("Second", "s", 1.0, &[TIME], &[]),
            Unit::system("Minute", "min", 60.0, &[TIME], &[]),
            Unit::system("Hour", "h", 3600.0, &[TIME], &[]),
        ],
    )
}

fn temperature() -> Category {
    Category::system(
        "Temperature",
        vec![
            Unit::system("Celsius", "°C", 1.0, &[TEMPERATURE], &[]),
            Unit::system("Fahrenheit", "°F", 1.0, &[TEMPERATURE], &[]),
            Unit::system("Kelvin", "K", 1.0, &[TEMPERATURE], &[]),
        ],
    )
}

fn energy() -> Category {
    Category::system(
        "Energy",
        vec![
            Unit::system("Joule", "J", 1.0, &[MASS, LENGTH, LENGTH], &[TIME, TIME])
                .with_metric_prefixes(),
            Unit::system("Calorie", "cal", 4.184, &[MASS, LENGTH, LENGTH], &[TIME, TIME]),
            Unit::system("Kilowatt-hour", "kWh", 3600000.0, &[MASS, LENGTH, LENGTH], &[TIME, TIME]),
        ],
    )
}
