//! FILENAME: core/persistence/src/seed.rs
//! PURPOSE: The categories and formulas a fresh installation starts with.
//! CONTEXT: Every built-in unit is system-defined, so users can add units
//! next to them but never edit or delete them.

use crate::error::StoreResult;
use crate::store::UnitStore;
use engine::dimension::{LENGTH, MASS, TEMPERATURE, TIME};
use engine::{Category, CustomFormula, DimensionId, TemperaturePreset, Unit};
use log::info;

/// Numerator and denominator of a dimension vector.
type Dims = (&'static [DimensionId], &'static [DimensionId]);

const DISTANCE: Dims = (&[LENGTH], &[]);
const DURATION: Dims = (&[TIME], &[]);
const WEIGHT: Dims = (&[MASS], &[]);
const SPEED: Dims = (&[LENGTH], &[TIME]);
const VOLUME: Dims = (&[LENGTH, LENGTH, LENGTH], &[]);
const AREA: Dims = (&[LENGTH, LENGTH], &[]);
const HEAT: Dims = (&[TEMPERATURE], &[]);
const ENERGY: Dims = (&[MASS, LENGTH, LENGTH], &[TIME, TIME]);
const PRESSURE: Dims = (&[MASS], &[LENGTH, LENGTH, TIME]);

fn unit(name: &str, symbol: &str, factor: f64, dims: Dims) -> Unit {
    Unit::system(name, symbol, factor, dims.0, dims.1)
}

fn distance() -> Category {
    Category::system(
        "Distance",
        vec![
            unit("Meter", "m", 1.0, DISTANCE).with_metric_prefixes(),
            unit("Kilometer", "km", 1000.0, DISTANCE),
            unit("Centimeter", "cm", 0.01, DISTANCE),
            unit("Millimeter", "mm", 0.001, DISTANCE),
            unit("Mile", "mi", 1609.34, DISTANCE),
            unit("Yard", "yd", 0.9144, DISTANCE),
            unit("Foot", "ft", 0.3048, DISTANCE),
            unit("Inch", "in", 0.0254, DISTANCE),
        ],
    )
}

fn time() -> Category {
    Category::system(
        "Time",
        vec![
            unit("Second", "s", 1.0, DURATION),
            unit("Minute", "min", 60.0, DURATION),
            unit("Hour", "h", 3600.0, DURATION),
            unit("Day", "d", 86400.0, DURATION),
            unit("Week", "wk", 604800.0, DURATION),
            unit("Month (avg)", "mo", 2628000.0, DURATION),
            unit("Year", "yr", 31536000.0, DURATION),
        ],
    )
}

fn mass() -> Category {
    Category::system(
        "Mass",
        vec![
            unit("Kilogram", "kg", 1.0, WEIGHT),
            unit("Gram", "g", 0.001, WEIGHT).with_metric_prefixes(),
            unit("Milligram", "mg", 0.000001, WEIGHT),
            unit("Metric Ton", "t", 1000.0, WEIGHT),
            unit("Pound", "lb", 0.453592, WEIGHT),
            unit("Ounce", "oz", 0.0283495, WEIGHT),
        ],
    )
}

fn speed() -> Category {
    Category::system(
        "Speed",
        vec![
            unit("Meters per Second", "m/s", 1.0, SPEED),
            unit("Kilometers per Hour", "km/h", 0.277778, SPEED),
            unit("Miles per Hour", "mph", 0.44704, SPEED),
            unit("Knot", "kn", 0.514444, SPEED),
        ],
    )
}

fn volume() -> Category {
    Category::system(
        "Volume",
        vec![
            unit("Cubic Meter", "m³", 1.0, VOLUME).with_metric_prefixes(),
            unit("Liter", "L", 0.001, VOLUME).with_metric_prefixes(),
            unit("Milliliter", "mL", 0.000001, VOLUME),
            unit("Gallon (US)", "gal", 0.00378541, VOLUME),
            unit("Quart (US)", "qt", 0.000946353, VOLUME),
            unit("Pint (US)", "pt", 0.000473176, VOLUME),
            unit("Cup (US)", "cup", 0.000236588, VOLUME),
            unit("Fluid Ounce (US)", "fl oz", 0.0000295735, VOLUME),
        ],
    )
}

fn area() -> Category {
    Category::system(
        "Area",
        vec![
            unit("Square Meter", "m²", 1.0, AREA).with_metric_prefixes(),
            unit("Square Kilometer", "km²", 1000000.0, AREA),
            unit("Hectare", "ha", 10000.0, AREA),
            unit("Square Mile", "mi²", 2589988.11, AREA),
            unit("Acre", "ac", 4046.86, AREA),
            unit("Square Foot", "ft²", 0.092903, AREA),
            unit("Square Inch", "in²", 0.00064516, AREA),
        ],
    )
}

fn temperature() -> Category {
    Category::system(
        "Temperature",
        vec![
            unit("Celsius", "°C", 1.0, HEAT),
            unit("Fahrenheit", "°F", 1.0, HEAT),
            unit("Kelvin", "K", 1.0, HEAT),
        ],
    )
}

fn energy() -> Category {
    Category::system(
        "Energy",
        vec![
            unit("Joule", "J", 1.0, ENERGY).with_metric_prefixes(),
            unit("Kilojoule", "kJ", 1000.0, ENERGY),
            unit("Calorie", "cal", 4.184, ENERGY),
            unit("Kilocalorie", "kcal", 4184.0, ENERGY),
            unit("Watt-hour", "Wh", 3600.0, ENERGY).with_metric_prefixes(),
            unit("Kilowatt-hour", "kWh", 3600000.0, ENERGY),
            unit("Electronvolt", "eV", 1.602176634e-19, ENERGY).with_metric_prefixes(),
        ],
    )
}

fn pressure() -> Category {
    Category::system(
        "Pressure",
        vec![
            unit("Pascal", "Pa", 1.0, PRESSURE).with_metric_prefixes(),
            unit("Kilopascal", "kPa", 1000.0, PRESSURE),
            unit("Bar", "bar", 100000.0, PRESSURE),
            unit("Atmosphere", "atm", 101325.0, PRESSURE),
            unit("Millimeter of Mercury", "mmHg", 133.322, PRESSURE),
            unit("Pound per Square Inch", "psi", 6894.76, PRESSURE),
        ],
    )
}

/// The built-in categories, in display order.
pub fn default_categories() -> Vec<Category> {
    vec![
        distance(),
        time(),
        mass(),
        speed(),
        volume(),
        area(),
        temperature(),
        energy(),
        pressure(),
    ]
}

/// The temperature presets as ready-made formulas.
pub fn default_formulas() -> Vec<CustomFormula> {
    TemperaturePreset::ALL
        .iter()
        .map(TemperaturePreset::to_custom_formula)
        .collect()
}

/// Fills an empty store with the built-in categories. Stores that already
/// hold any category are left alone. Returns whether seeding happened.
pub fn seed_if_empty<S: UnitStore + ?Sized>(store: &mut S) -> StoreResult<bool> {
    if !store.is_empty()? {
        return Ok(false);
    }

    let categories = default_categories();
    let count = categories.len();
    for category in categories {
        store.save_category(category)?;
    }
    info!(target: "STORE", "seeded {} built-in categories", count);
    Ok(true)
}
