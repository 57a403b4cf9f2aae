//! FILENAME: core/engine/src/functions.rs
//! PURPOSE: Implementations of the whitelisted math functions.
//! CONTEXT: The evaluator resolves arguments and hands plain numbers to `call`.
//! Domain checks live here so a bad input becomes an `EvalError::DomainError`
//! instead of a silent NaN.

use crate::config::DivisionByZero;
use crate::error::{EvalError, EvalResult};
use parser::BuiltinFunction;

/// Applies `func` to already-evaluated arguments.
pub(crate) fn call(
    func: BuiltinFunction,
    args: &[f64],
    division: DivisionByZero,
) -> EvalResult<f64> {
    if !func.arity().accepts(args.len()) {
        return Err(EvalError::ArgumentCount {
            function: func.name(),
            got: args.len(),
        });
    }

    match func {
        // ==================== Powers and roots ====================
        BuiltinFunction::Sqrt => {
            let x = args[0];
            if x < 0.0 {
                return Err(EvalError::domain(format!("sqrt of negative number {}", x)));
            }
            Ok(x.sqrt())
        }
        BuiltinFunction::Cbrt => Ok(args[0].cbrt()),
        BuiltinFunction::Pow => power(args[0], args[1], division),
        BuiltinFunction::Exp => Ok(args[0].exp()),
        BuiltinFunction::Log => logarithm("log", args[0], f64::ln),
        BuiltinFunction::Log10 => logarithm("log10", args[0], f64::log10),

        // ==================== Trigonometry ====================
        BuiltinFunction::Sin => Ok(args[0].sin()),
        BuiltinFunction::Cos => Ok(args[0].cos()),
        BuiltinFunction::Tan => Ok(args[0].tan()),
        BuiltinFunction::Asin => unit_interval("asin", args[0]).map(f64::asin),
        BuiltinFunction::Acos => unit_interval("acos", args[0]).map(f64::acos),
        BuiltinFunction::Atan => Ok(args[0].atan()),
        BuiltinFunction::Atan2 => Ok(args[0].atan2(args[1])),

        // ==================== Rounding and comparison ====================
        BuiltinFunction::Abs => Ok(args[0].abs()),
        BuiltinFunction::Floor => Ok(args[0].floor()),
        BuiltinFunction::Ceil => Ok(args[0].ceil()),
        BuiltinFunction::Round => match args {
            [x, digits] => round_to(*x, *digits),
            _ => Ok(args[0].round()),
        },
        BuiltinFunction::Max => Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        BuiltinFunction::Min => Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
    }
}

/// `base ^ exponent`, shared by the `^` operator and `pow()`.
/// Zero raised to a negative power is a division by zero.
pub(crate) fn power(base: f64, exponent: f64, division: DivisionByZero) -> EvalResult<f64> {
    if base == 0.0 && exponent < 0.0 && division == DivisionByZero::Error {
        return Err(EvalError::DivisionByZero);
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(EvalError::domain(format!(
            "negative base {} with fractional exponent {}",
            base, exponent
        )));
    }
    Ok(base.powf(exponent))
}

fn logarithm(name: &str, x: f64, f: fn(f64) -> f64) -> EvalResult<f64> {
    if x <= 0.0 {
        return Err(EvalError::domain(format!(
            "{} of non-positive number {}",
            name, x
        )));
    }
    Ok(f(x))
}

fn unit_interval(name: &str, x: f64) -> EvalResult<f64> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(EvalError::domain(format!(
            "{} argument {} is outside [-1, 1]",
            name, x
        )));
    }
    Ok(x)
}

/// round(x, digits): negative digits round to tens, hundreds, ...
fn round_to(x: f64, digits: f64) -> EvalResult<f64> {
    if !digits.is_finite() {
        return Err(EvalError::domain(format!(
            "round() digits must be finite, got {}",
            digits
        )));
    }
    let digits = digits.trunc().clamp(-308.0, 308.0) as i32;
    if digits < 0 {
        let step = 10f64.powi(-digits);
        return Ok((x / step).round() * step);
    }
    let factor = 10f64.powi(digits);
    let scaled = x * factor;
    if !scaled.is_finite() {
        // More digits than f64 can hold
        return Ok(x);
    }
    Ok(scaled.round() / factor)
}
