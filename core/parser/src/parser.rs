//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a stream of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes tokens
//! from the Lexer and builds an Expression tree that can be evaluated.
//! Identifiers are resolved against the fixed variable/constant/function
//! whitelist here, so an AST that parses can only ever describe arithmetic.
//!
//! GRAMMAR:
//!   expression     --> additive
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/") unary )*
//!   unary          --> "-" unary | power
//!   power          --> primary ( "^" unary )?
//!   primary        --> NUMBER | variable | constant | function_call | "(" expression ")"
//!   function_call  --> FUNCTION "(" arguments? ")"
//!   arguments      --> expression ("," expression)*
//!
//! LIMITS:
//!   Both the parser's recursion and the height of every node it builds are
//!   capped at `ParserOptions::max_depth`, so hostile input fails with
//!   `ParseErrorKind::TooDeep` instead of exhausting the stack.

use crate::ast::{BinaryOperator, BuiltinFunction, Constant, Expression, UnaryOperator, Variable};
use crate::lexer::Lexer;
use crate::token::Token;

/// Default cap on nesting and AST height.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables for the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting depth and AST height.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Broad classification of a parse failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseErrorKind {
    UnexpectedToken,
    UnbalancedParens,
    UnknownIdentifier,
    EmptyExpression,
    /// A whitelisted function called with the wrong number of arguments.
    ArgumentCount,
    /// Nesting or tree height exceeded `ParserOptions::max_depth`.
    TooDeep,
}

/// Parser errors with descriptive messages.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Byte offset into the formula where the problem was found.
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, position: usize) -> Self {
        ParseError {
            kind,
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// The Parser struct holds the lexer and current token state.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    current_position: usize,
    options: ParserOptions,
    /// Current recursion depth through nested groups and negations.
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser from an input string.
    /// Automatically advances to the first token.
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParserOptions) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        let current_position = lexer.token_start();
        Parser {
            lexer,
            current_token,
            current_position,
            options,
            nesting: 0,
        }
    }

    /// Parses the entire input and returns the AST.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        if self.current_token == Token::EOF {
            return Err(self.error(ParseErrorKind::EmptyExpression, "Empty expression"));
        }

        let expr = self.parse_expression()?;

        // Ensure we consumed all tokens
        match &self.current_token {
            Token::EOF => Ok(expr),
            Token::RParen => Err(self.error(ParseErrorKind::UnbalancedParens, "Unmatched ')'")),
            token => Err(self.error(
                ParseErrorKind::UnexpectedToken,
                format!("Unexpected token after expression: '{}'", token),
            )),
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
        self.current_position = self.lexer.token_start();
    }

    fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(kind, message, self.current_position)
    }

    /// Consumes the ')' closing a group or an argument list.
    fn expect_closing_paren(&mut self) -> ParseResult<()> {
        match &self.current_token {
            Token::RParen => {
                self.advance();
                Ok(())
            }
            Token::EOF => Err(self.error(ParseErrorKind::UnbalancedParens, "Missing ')'")),
            token => Err(self.error(
                ParseErrorKind::UnexpectedToken,
                format!("Expected ')', found '{}'", token),
            )),
        }
    }

    /// Counts one level of recursion, failing once the cap is exceeded.
    fn enter(&mut self) -> ParseResult<()> {
        self.nesting += 1;
        if self.nesting > self.options.max_depth {
            return Err(self.error(
                ParseErrorKind::TooDeep,
                format!("Expression nests deeper than {} levels", self.options.max_depth),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    /// Accepts a freshly built node if its height stays within the cap.
    /// Children were checked when they were built, so long operator chains
    /// are rejected as soon as they cross the limit.
    fn node(&self, expr: Expression) -> ParseResult<Expression> {
        if expr.depth() > self.options.max_depth {
            return Err(self.error(
                ParseErrorKind::TooDeep,
                format!("Expression is deeper than {} levels", self.options.max_depth),
            ));
        }
        Ok(expr)
    }

    fn binary(
        &self,
        left: Expression,
        op: BinaryOperator,
        right: Expression,
    ) -> ParseResult<Expression> {
        self.node(Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Entry point for expression parsing.
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.enter()?;
        let result = self.parse_additive();
        self.leave();
        result
    }

    /// Parses additive expressions (+ and -).
    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.binary(left, op, right)?;
        }

        Ok(left)
    }

    /// Parses multiplicative expressions (* and /).
    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current_token {
                Token::Asterisk => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.advance();
            let right = self.parse_unary()?;
            left = self.binary(left, op, right)?;
        }

        Ok(left)
    }

    /// Parses unary expressions (negation).
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.current_token == Token::Minus {
            self.advance();
            self.enter()?;
            let operand = self.parse_unary();
            self.leave();
            return self.node(Expression::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand?),
            });
        }

        self.parse_power()
    }

    /// Parses power/exponentiation expressions (^).
    /// The exponent is parsed as a unary, which makes ^ right associative.
    fn parse_power(&mut self) -> ParseResult<Expression> {
        let left = self.parse_primary()?;

        if self.current_token == Token::Caret {
            self.advance();
            self.enter()?;
            let right = self.parse_unary();
            self.leave();
            return self.binary(left, BinaryOperator::Power, right?);
        }

        Ok(left)
    }

    /// Parses primary expressions (literals, names, function calls, parentheses).
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_token.clone() {
            // Literals beyond f64 range lex as infinity
            Token::Number(n) if !n.is_finite() => Err(self.error(
                ParseErrorKind::UnexpectedToken,
                "Number out of range",
            )),

            Token::Number(n) => {
                self.advance();
                Ok(Expression::Number(n))
            }

            Token::Identifier(name) => self.parse_identifier(name),

            // Parenthesized expression
            Token::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_closing_paren()?;
                Ok(expr)
            }

            // Error cases
            Token::EOF => Err(self.error(
                ParseErrorKind::UnexpectedToken,
                "Unexpected end of expression",
            )),

            Token::RParen => Err(self.error(ParseErrorKind::UnbalancedParens, "Unexpected ')'")),

            Token::Illegal(ch) => Err(self.error(
                ParseErrorKind::UnexpectedToken,
                format!("Illegal character: '{}'", ch),
            )),

            token => Err(self.error(
                ParseErrorKind::UnexpectedToken,
                format!("Unexpected token: '{}'", token),
            )),
        }
    }

    /// Resolves an identifier against the whitelist.
    fn parse_identifier(&mut self, name: String) -> ParseResult<Expression> {
        if let Some(var) = Variable::from_name(&name) {
            self.advance();
            return Ok(Expression::Variable(var));
        }

        if let Some(constant) = Constant::from_name(&name) {
            self.advance();
            return Ok(Expression::Constant(constant));
        }

        if let Some(func) = BuiltinFunction::from_name(&name) {
            let call_position = self.current_position;
            self.advance();
            if self.current_token != Token::LParen {
                return Err(self.error(
                    ParseErrorKind::UnexpectedToken,
                    format!("Function '{}' must be followed by '('", name),
                ));
            }
            return self.parse_function_call(func, call_position);
        }

        Err(self.error(
            ParseErrorKind::UnknownIdentifier,
            format!("Unknown identifier: '{}'", name),
        ))
    }

    /// Parses a function call like pow(x, 2) and checks its argument count.
    fn parse_function_call(
        &mut self,
        func: BuiltinFunction,
        call_position: usize,
    ) -> ParseResult<Expression> {
        // Consume the '('
        self.advance();

        let mut args = Vec::new();

        if self.current_token != Token::RParen {
            args.push(self.parse_expression()?);

            // Parse remaining arguments separated by commas
            while self.current_token == Token::Comma {
                self.advance();
                args.push(self.parse_expression()?);
            }
        }

        self.expect_closing_paren()?;

        let arity = func.arity();
        if !arity.accepts(args.len()) {
            return Err(ParseError::new(
                ParseErrorKind::ArgumentCount,
                format!("{}() takes {}, got {}", func.name(), arity, args.len()),
                call_position,
            ));
        }

        self.node(Expression::FunctionCall { func, args })
    }
}

/// Convenience function to parse a formula string directly.
pub fn parse(input: &str) -> ParseResult<Expression> {
    let mut parser = Parser::new(input);
    parser.parse()
}

/// Parses with explicit limits.
pub fn parse_with_options(input: &str, options: ParserOptions) -> ParseResult<Expression> {
    let mut parser = Parser::with_options(input, options);
    parser.parse()
}
