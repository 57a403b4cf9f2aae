//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates formula ASTs to a number.
//! CONTEXT: After a formula is parsed into an AST, this module walks the
//! tree with a set of variable bindings and computes the result. The walk
//! is a pure function of (AST, bindings, config): nothing is cached and
//! nothing outside the tree can be reached.
//!
//! SUPPORTED FEATURES:
//! - Literals, the constants PI and E, the variables x, y and z
//! - Binary operations: +, -, *, /, ^
//! - Unary negation
//! - The whitelisted math functions (see functions.rs)

use crate::config::{DivisionByZero, EngineConfig, UnboundVariables};
use crate::error::{EvalError, EvalResult};
use crate::functions;
use parser::{BinaryOperator, BuiltinFunction, Expression, UnaryOperator, Variable};
use std::collections::HashMap;

/// Values for the formula variables. Unset variables stay unbound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bindings {
    values: [Option<f64>; 3],
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings with only `x` set, the common case for conversion formulas.
    pub fn x(value: f64) -> Self {
        Self::new().with(Variable::X, value)
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Bindings {
            values: [Some(x), Some(y), Some(z)],
        }
    }

    pub fn with(mut self, var: Variable, value: f64) -> Self {
        self.set(var, value);
        self
    }

    pub fn set(&mut self, var: Variable, value: f64) {
        self.values[slot(var)] = Some(value);
    }

    pub fn get(&self, var: Variable) -> Option<f64> {
        self.values[slot(var)]
    }

    /// Builds bindings from a name -> value map. Names are matched
    /// case-insensitively; anything other than x, y or z is rejected.
    pub fn from_map(map: &HashMap<String, f64>) -> EvalResult<Self> {
        let mut bindings = Bindings::new();
        for (name, value) in map {
            let var = Variable::from_name(&name.to_ascii_lowercase())
                .ok_or_else(|| EvalError::UnknownVariable(name.clone()))?;
            bindings.set(var, *value);
        }
        Ok(bindings)
    }
}

impl FromIterator<(Variable, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (var, value) in iter {
            bindings.set(var, value);
        }
        bindings
    }
}

fn slot(var: Variable) -> usize {
    match var {
        Variable::X => 0,
        Variable::Y => 1,
        Variable::Z => 2,
    }
}

/// The evaluator holds the bindings and policies for one evaluation.
pub struct Evaluator<'a> {
    bindings: &'a Bindings,
    config: EngineConfig,
}

impl<'a> Evaluator<'a> {
    /// Creates a new evaluator with the default policies.
    pub fn new(bindings: &'a Bindings) -> Self {
        Self::with_config(bindings, EngineConfig::default())
    }

    pub fn with_config(bindings: &'a Bindings, config: EngineConfig) -> Self {
        Evaluator { bindings, config }
    }

    /// Evaluates an expression and returns the result.
    /// Trees taller than `max_depth` are refused before any recursion starts,
    /// which matters for ASTs assembled by hand rather than by the parser.
    pub fn evaluate(&self, expr: &Expression) -> EvalResult<f64> {
        if expr.depth() > self.config.max_depth {
            return Err(EvalError::TooDeep {
                max_depth: self.config.max_depth,
            });
        }
        self.eval(expr)
    }

    fn eval(&self, expr: &Expression) -> EvalResult<f64> {
        match expr {
            Expression::Number(n) => Ok(*n),
            Expression::Constant(c) => Ok(c.value()),
            Expression::Variable(var) => self.eval_variable(*var),
            Expression::BinaryOp { left, op, right } => self.eval_binary_op(left, op, right),
            Expression::UnaryOp { op, operand } => self.eval_unary_op(op, operand),
            Expression::FunctionCall { func, args } => self.eval_function(*func, args),
        }
    }

    fn eval_variable(&self, var: Variable) -> EvalResult<f64> {
        match (self.bindings.get(var), self.config.unbound_variables) {
            (Some(value), _) => Ok(value),
            (None, UnboundVariables::Zero) => Ok(0.0),
            (None, UnboundVariables::Error) => Err(EvalError::UnboundVariable(var)),
        }
    }

    /// Evaluates a binary operation. Left is evaluated before right.
    fn eval_binary_op(
        &self,
        left: &Expression,
        op: &BinaryOperator,
        right: &Expression,
    ) -> EvalResult<f64> {
        let l = self.eval(left)?;
        let r = self.eval(right)?;

        match op {
            BinaryOperator::Add => Ok(l + r),
            BinaryOperator::Subtract => Ok(l - r),
            BinaryOperator::Multiply => Ok(l * r),
            BinaryOperator::Divide => self.eval_divide(l, r),
            BinaryOperator::Power => functions::power(l, r, self.config.division_by_zero),
        }
    }

    fn eval_divide(&self, left: f64, right: f64) -> EvalResult<f64> {
        if right == 0.0 && self.config.division_by_zero == DivisionByZero::Error {
            return Err(EvalError::DivisionByZero);
        }
        Ok(left / right)
    }

    fn eval_unary_op(&self, op: &UnaryOperator, operand: &Expression) -> EvalResult<f64> {
        let value = self.eval(operand)?;
        match op {
            UnaryOperator::Negate => Ok(-value),
        }
    }

    /// Arguments are evaluated in order; the first failure wins.
    fn eval_function(&self, func: BuiltinFunction, args: &[Expression]) -> EvalResult<f64> {
        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<EvalResult<Vec<f64>>>()?;
        functions::call(func, &values, self.config.division_by_zero)
    }
}

/// Evaluates `expr` with the default policies.
pub fn evaluate(expr: &Expression, bindings: &Bindings) -> EvalResult<f64> {
    Evaluator::new(bindings).evaluate(expr)
}

pub fn evaluate_with_config(
    expr: &Expression,
    bindings: &Bindings,
    config: EngineConfig,
) -> EvalResult<f64> {
    Evaluator::with_config(bindings, config).evaluate(expr)
}
