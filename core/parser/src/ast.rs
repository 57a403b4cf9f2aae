//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. The Evaluator then traverses
//! this tree to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Numeric literals: 42, 3.14, .5, 1e-3
//! - Variables: x, y, z
//! - Constants: PI, E
//! - Binary operations: +, -, *, /, ^
//! - Unary operations: - (negation)
//! - Calls to the fixed function whitelist: sqrt(x), pow(x, 2), max(x, y, z)

use std::collections::BTreeSet;
use std::fmt;

/// Represents a parsed formula expression.
/// This is the core data structure that the evaluator will traverse.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A numeric literal.
    Number(f64),

    /// A reference to one of the formula parameters.
    Variable(Variable),

    /// A named mathematical constant.
    Constant(Constant),

    /// A binary operation: left op right (e.g., x * 2).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// A unary operation: op operand (e.g., -x).
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// A call to a whitelisted function like sqrt(x) or atan2(y, x).
    FunctionCall {
        func: BuiltinFunction,
        args: Vec<Expression>,
    },
}

/// The free variables a formula may reference.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Variable {
    X,
    Y,
    Z,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::X, Variable::Y, Variable::Z];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Variable::X),
            "y" => Some(Variable::Y),
            "z" => Some(Variable::Z),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::Y => "y",
            Variable::Z => "z",
        }
    }
}

/// Named constants.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "PI",
            Constant::E => "E",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Binary operators for expressions.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Power,    // ^ (highest precedence, right associative)
}

impl BinaryOperator {
    /// Binding strength, higher binds tighter. Unary negation sits at 3.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
            BinaryOperator::Power => 4,
        }
    }
}

/// Unary operators.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum UnaryOperator {
    Negate, // -
}

/// How many arguments a builtin function accepts.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(1) => write!(f, "1 argument"),
            Arity::Exact(n) => write!(f, "{} arguments", n),
            Arity::Between(min, max) => write!(f, "{} to {} arguments", min, max),
            Arity::AtLeast(min) => write!(f, "at least {} arguments", min),
        }
    }
}

/// The closed set of functions a formula may call.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BuiltinFunction {
    // Powers and roots
    Sqrt,
    Cbrt,
    Pow,
    Exp,
    Log,
    Log10,

    // Trigonometry (radians)
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,

    // Rounding and comparison
    Abs,
    Floor,
    Ceil,
    Round,
    Max,
    Min,
}

impl BuiltinFunction {
    pub const ALL: [BuiltinFunction; 19] = [
        BuiltinFunction::Sqrt,
        BuiltinFunction::Cbrt,
        BuiltinFunction::Pow,
        BuiltinFunction::Exp,
        BuiltinFunction::Log,
        BuiltinFunction::Log10,
        BuiltinFunction::Sin,
        BuiltinFunction::Cos,
        BuiltinFunction::Tan,
        BuiltinFunction::Asin,
        BuiltinFunction::Acos,
        BuiltinFunction::Atan,
        BuiltinFunction::Atan2,
        BuiltinFunction::Abs,
        BuiltinFunction::Floor,
        BuiltinFunction::Ceil,
        BuiltinFunction::Round,
        BuiltinFunction::Max,
        BuiltinFunction::Min,
    ];

    /// Looks up a function by its (lowercase) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|func| func.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunction::Sqrt => "sqrt",
            BuiltinFunction::Cbrt => "cbrt",
            BuiltinFunction::Pow => "pow",
            BuiltinFunction::Exp => "exp",
            BuiltinFunction::Log => "log",
            BuiltinFunction::Log10 => "log10",
            BuiltinFunction::Sin => "sin",
            BuiltinFunction::Cos => "cos",
            BuiltinFunction::Tan => "tan",
            BuiltinFunction::Asin => "asin",
            BuiltinFunction::Acos => "acos",
            BuiltinFunction::Atan => "atan",
            BuiltinFunction::Atan2 => "atan2",
            BuiltinFunction::Abs => "abs",
            BuiltinFunction::Floor => "floor",
            BuiltinFunction::Ceil => "ceil",
            BuiltinFunction::Round => "round",
            BuiltinFunction::Max => "max",
            BuiltinFunction::Min => "min",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            BuiltinFunction::Pow | BuiltinFunction::Atan2 => Arity::Exact(2),
            // round(x) or round(x, digits)
            BuiltinFunction::Round => Arity::Between(1, 2),
            BuiltinFunction::Max | BuiltinFunction::Min => Arity::AtLeast(2),
            _ => Arity::Exact(1),
        }
    }
}

impl Expression {
    /// Height of the tree; a lone literal has depth 1.
    /// Walks with an explicit stack so arbitrarily deep trees are safe to measure.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];

        while let Some((expr, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            match expr {
                Expression::BinaryOp { left, right, .. } => {
                    stack.push((left.as_ref(), depth + 1));
                    stack.push((right.as_ref(), depth + 1));
                }
                Expression::UnaryOp { operand, .. } => stack.push((operand.as_ref(), depth + 1)),
                Expression::FunctionCall { args, .. } => {
                    stack.extend(args.iter().map(|arg| (arg, depth + 1)));
                }
                Expression::Number(_) | Expression::Variable(_) | Expression::Constant(_) => {}
            }
        }

        max_depth
    }

    /// The set of variables referenced anywhere in the tree.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut found = BTreeSet::new();
        let mut stack = vec![self];

        while let Some(expr) = stack.pop() {
            match expr {
                Expression::Variable(var) => {
                    found.insert(*var);
                }
                Expression::BinaryOp { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
                Expression::UnaryOp { operand, .. } => stack.push(operand),
                Expression::FunctionCall { args, .. } => stack.extend(args.iter()),
                Expression::Number(_) | Expression::Constant(_) => {}
            }
        }

        found
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::BinaryOp { op, .. } => op.precedence(),
            Expression::UnaryOp { .. } => 3,
            // Prints with a leading '-', so it binds like a negation
            Expression::Number(n) if n.is_sign_negative() => 3,
            _ => 5,
        }
    }
}

/// Writes `expr`, wrapped in parentheses when its precedence is below `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expression, min: u8) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Renders the tree back to formula text with the minimum of parentheses.
/// The output parses back to an equal tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Variable(var) => write!(f, "{}", var.name()),
            Expression::Constant(c) => write!(f, "{}", c.name()),
            Expression::BinaryOp { left, op, right } => {
                let prec = op.precedence();
                if *op == BinaryOperator::Power {
                    // Base must be primary, exponent may be unary or another power
                    write_operand(f, left, 5)?;
                    write!(f, " {} ", op)?;
                    write_operand(f, right, 3)
                } else {
                    write_operand(f, left, prec)?;
                    write!(f, " {} ", op)?;
                    write_operand(f, right, prec + 1)
                }
            }
            Expression::UnaryOp { op, operand } => {
                write!(f, "{}", op)?;
                write_operand(f, operand, 3)
            }
            Expression::FunctionCall { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Power => write!(f, "^"),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
