//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the formula parser.
//! CONTEXT: This module exposes the lexer, parser, and AST components
//! needed to convert user formulas into evaluatable expression trees.
//!
//! PIPELINE: Formula String --> Lexer --> Tokens --> Parser --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /, ^ (power, right associative)
//! - Unary negation: -x
//! - Variables: x, y, z
//! - Constants: PI, E
//! - Whitelisted functions: sqrt, cbrt, pow, exp, log, log10, sin, cos, tan,
//!   asin, acos, atan, atan2, abs, floor, ceil, round, max, min
//! - Parentheses for grouping
//!
//! Anything outside that whitelist is rejected at parse time.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

// Register the separate tests module
#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use ast::{
    Arity, BinaryOperator, BuiltinFunction, Constant, Expression, UnaryOperator, Variable,
};
pub use lexer::Lexer;
pub use parser::{
    parse, parse_with_options, ParseError, ParseErrorKind, ParseResult, Parser, ParserOptions,
    DEFAULT_MAX_DEPTH,
};
pub use token::Token;
