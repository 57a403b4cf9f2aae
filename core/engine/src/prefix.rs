//! FILENAME: core/engine/src/prefix.rs
//! PURPOSE: SI prefixes and the prefixed unit variants they generate.
//! CONTEXT: Units flagged with `use_metric_prefixes` (metre, gram, litre,
//! joule, ...) expand into km, mg, µL, MJ and so on. Area and volume
//! units scale by the prefix squared or cubed: 1 km² is 1e6 m².

use crate::model::{Category, Unit};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPrefix {
    pub name: &'static str,
    pub symbol: &'static str,
    pub multiplier: f64,
}

/// Largest to smallest.
pub const METRIC_PREFIXES: [MetricPrefix; 12] = [
    MetricPrefix {
        name: "Tera",
        symbol: "T",
        multiplier: 1e12,
    },
    MetricPrefix {
        name: "Giga",
        symbol: "G",
        multiplier: 1e9,
    },
    MetricPrefix {
        name: "Mega",
        symbol: "M",
        multiplier: 1e6,
    },
    MetricPrefix {
        name: "Kilo",
        symbol: "k",
        multiplier: 1e3,
    },
    MetricPrefix {
        name: "Hecto",
        symbol: "h",
        multiplier: 1e2,
    },
    MetricPrefix {
        name: "Deca",
        symbol: "da",
        multiplier: 1e1,
    },
    MetricPrefix {
        name: "Deci",
        symbol: "d",
        multiplier: 1e-1,
    },
    MetricPrefix {
        name: "Centi",
        symbol: "c",
        multiplier: 1e-2,
    },
    MetricPrefix {
        name: "Milli",
        symbol: "m",
        multiplier: 1e-3,
    },
    MetricPrefix {
        name: "Micro",
        symbol: "µ",
        multiplier: 1e-6,
    },
    MetricPrefix {
        name: "Nano",
        symbol: "n",
        multiplier: 1e-9,
    },
    MetricPrefix {
        name: "Pico",
        symbol: "p",
        multiplier: 1e-12,
    },
];

impl MetricPrefix {
    pub fn from_symbol(symbol: &str) -> Option<MetricPrefix> {
        METRIC_PREFIXES.iter().copied().find(|p| p.symbol == symbol)
    }
}

/// Power a prefix is raised to: 2 for m², 3 for m³, otherwise 1.
fn symbol_exponent(symbol: &str) -> i32 {
    match symbol.chars().last() {
        Some('²') => 2,
        Some('³') => 3,
        _ => 1,
    }
}

/// Puts the prefix on the last word: "Square Meter" -> "Square Kilometer".
fn prefixed_name(prefix: &str, name: &str) -> String {
    let (head, last) = match name.rfind(' ') {
        Some(split) => name.split_at(split + 1),
        None => ("", name),
    };
    format!("{}{}{}", head, prefix, last.to_lowercase())
}

impl Unit {
    /// The unit with `prefix` applied, e.g. Meter -> Kilometer (km).
    /// The variant gets its own id and cannot itself be prefixed again.
    pub fn with_prefix(&self, prefix: MetricPrefix) -> Unit {
        let exponent = symbol_exponent(&self.symbol);
        Unit {
            id: Uuid::new_v4(),
            name: prefixed_name(prefix.name, &self.name),
            symbol: format!("{}{}", prefix.symbol, self.symbol),
            use_metric_prefixes: false,
            factor: self.factor * prefix.multiplier.powi(exponent),
            conversion_formula: None,
            ..self.clone()
        }
    }
}

impl Category {
    /// Prefixed variants of every prefixable unit, skipping symbols the
    /// category already defines. Units driven by a formula are never prefixed.
    pub fn prefixed_variants(&self) -> Vec<Unit> {
        let mut taken: HashSet<String> =
            self.units.iter().map(|u| u.symbol.clone()).collect();
        let mut variants = Vec::new();

        for unit in &self.units {
            if !unit.use_metric_prefixes || unit.conversion_formula.is_some() {
                continue;
            }
            for prefix in METRIC_PREFIXES {
                let variant = unit.with_prefix(prefix);
                if taken.insert(variant.symbol.clone()) {
                    variants.push(variant);
                }
            }
        }

        variants
    }
}
