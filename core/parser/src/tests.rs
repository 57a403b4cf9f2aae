//! FILENAME: core/parser/src/tests.rs
//! PURPOSE: Consolidated unit tests for the parser crate.

use crate::ast::{BinaryOperator, BuiltinFunction, Constant, Expression, UnaryOperator, Variable};
use crate::lexer::Lexer;
use crate::parser::{parse, parse_with_options, ParseErrorKind, ParserOptions};
use crate::token::Token;

fn num(n: f64) -> Box<Expression> {
    Box::new(Expression::Number(n))
}

fn var(v: Variable) -> Box<Expression> {
    Box::new(Expression::Variable(v))
}

fn error_kind(input: &str) -> ParseErrorKind {
    parse(input).unwrap_err().kind
}

// ========================================
// LEXER TESTS
// ========================================

#[test]
fn lexer_tokenizes_simple_math() {
    let mut lexer = Lexer::new("1 + 2");

    assert_eq!(lexer.next_token(), Token::Number(1.0));
    assert_eq!(lexer.next_token(), Token::Plus);
    assert_eq!(lexer.next_token(), Token::Number(2.0));
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn lexer_tokenizes_functions() {
    let mut lexer = Lexer::new("pow(x, 10)");

    assert_eq!(lexer.next_token(), Token::Identifier("pow".to_string()));
    assert_eq!(lexer.next_token(), Token::LParen);
    assert_eq!(lexer.next_token(), Token::Identifier("x".to_string()));
    assert_eq!(lexer.next_token(), Token::Comma);
    assert_eq!(lexer.next_token(), Token::Number(10.0));
    assert_eq!(lexer.next_token(), Token::RParen);
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn lexer_normalizes_identifiers_to_lowercase() {
    let mut lexer = Lexer::new("PI Sqrt X");

    assert_eq!(lexer.next_token(), Token::Identifier("pi".to_string()));
    assert_eq!(lexer.next_token(), Token::Identifier("sqrt".to_string()));
    assert_eq!(lexer.next_token(), Token::Identifier("x".to_string()));
}

#[test]
fn lexer_reads_decimal_forms() {
    let mut lexer = Lexer::new(".5 6.02214 273.15");

    assert_eq!(lexer.next_token(), Token::Number(0.5));
    assert_eq!(lexer.next_token(), Token::Number(6.02214));
    assert_eq!(lexer.next_token(), Token::Number(273.15));
}

#[test]
fn lexer_reads_scientific_notation() {
    let mut lexer = Lexer::new("1e3 2.5E-4 6e+2");

    assert_eq!(lexer.next_token(), Token::Number(1000.0));
    assert_eq!(lexer.next_token(), Token::Number(2.5e-4));
    assert_eq!(lexer.next_token(), Token::Number(600.0));
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn lexer_leaves_trailing_e_as_identifier() {
    // "2e" is the number 2 followed by the constant e, not a broken exponent
    let mut lexer = Lexer::new("2e");

    assert_eq!(lexer.next_token(), Token::Number(2.0));
    assert_eq!(lexer.next_token(), Token::Identifier("e".to_string()));
}

#[test]
fn lexer_flags_illegal_characters() {
    let mut lexer = Lexer::new("x ; y");

    assert_eq!(lexer.next_token(), Token::Identifier("x".to_string()));
    assert_eq!(lexer.next_token(), Token::Illegal(';'));
}

#[test]
fn lexer_tracks_token_positions() {
    let mut lexer = Lexer::new("x  * 20");

    lexer.next_token();
    assert_eq!(lexer.token_start(), 0);
    lexer.next_token();
    assert_eq!(lexer.token_start(), 3);
    lexer.next_token();
    assert_eq!(lexer.token_start(), 5);
    assert_eq!(lexer.next_token(), Token::EOF);
    assert_eq!(lexer.token_start(), 7);
}

// ========================================
// PARSER TESTS - LITERALS AND NAMES
// ========================================

#[test]
fn parser_parses_number_literal() {
    assert_eq!(parse("42").unwrap(), Expression::Number(42.0));
}

#[test]
fn parser_parses_variables() {
    assert_eq!(parse("x").unwrap(), Expression::Variable(Variable::X));
    assert_eq!(parse("y").unwrap(), Expression::Variable(Variable::Y));
    assert_eq!(parse("Z").unwrap(), Expression::Variable(Variable::Z));
}

#[test]
fn parser_parses_constants() {
    assert_eq!(parse("PI").unwrap(), Expression::Constant(Constant::Pi));
    assert_eq!(parse("e").unwrap(), Expression::Constant(Constant::E));
}

// ========================================
// PARSER TESTS - BINARY OPERATIONS
// ========================================

#[test]
fn parser_parses_multiplication() {
    assert_eq!(
        parse("x * 2").unwrap(),
        Expression::BinaryOp {
            left: var(Variable::X),
            op: BinaryOperator::Multiply,
            right: num(2.0),
        }
    );
}

#[test]
fn parser_parses_power() {
    assert_eq!(
        parse("x ^ 3").unwrap(),
        Expression::BinaryOp {
            left: var(Variable::X),
            op: BinaryOperator::Power,
            right: num(3.0),
        }
    );
}

#[test]
fn parser_division_by_literal_zero_is_not_a_parse_error() {
    assert_eq!(
        parse("x / 0").unwrap(),
        Expression::BinaryOp {
            left: var(Variable::X),
            op: BinaryOperator::Divide,
            right: num(0.0),
        }
    );
}

// ========================================
// PARSER TESTS - OPERATOR PRECEDENCE
// ========================================

#[test]
fn parser_respects_mul_over_add() {
    // x * 9/5 + 32 => ((x * 9) / 5) + 32
    let expected = Expression::BinaryOp {
        left: Box::new(Expression::BinaryOp {
            left: Box::new(Expression::BinaryOp {
                left: var(Variable::X),
                op: BinaryOperator::Multiply,
                right: num(9.0),
            }),
            op: BinaryOperator::Divide,
            right: num(5.0),
        }),
        op: BinaryOperator::Add,
        right: num(32.0),
    };
    assert_eq!(parse("x * 9/5 + 32").unwrap(), expected);
}

#[test]
fn parser_respects_parentheses() {
    // (x - 32) * 5/9
    let expected = Expression::BinaryOp {
        left: Box::new(Expression::BinaryOp {
            left: Box::new(Expression::BinaryOp {
                left: var(Variable::X),
                op: BinaryOperator::Subtract,
                right: num(32.0),
            }),
            op: BinaryOperator::Multiply,
            right: num(5.0),
        }),
        op: BinaryOperator::Divide,
        right: num(9.0),
    };
    assert_eq!(parse("(x - 32) * 5/9").unwrap(), expected);
}

#[test]
fn parser_subtraction_is_left_associative() {
    let expected = Expression::BinaryOp {
        left: Box::new(Expression::BinaryOp {
            left: num(10.0),
            op: BinaryOperator::Subtract,
            right: num(3.0),
        }),
        op: BinaryOperator::Subtract,
        right: num(2.0),
    };
    assert_eq!(parse("10 - 3 - 2").unwrap(), expected);
}

#[test]
fn parser_power_is_right_associative() {
    let expected = Expression::BinaryOp {
        left: num(2.0),
        op: BinaryOperator::Power,
        right: Box::new(Expression::BinaryOp {
            left: num(3.0),
            op: BinaryOperator::Power,
            right: num(2.0),
        }),
    };
    assert_eq!(parse("2 ^ 3 ^ 2").unwrap(), expected);
}

#[test]
fn parser_power_binds_tighter_than_negation() {
    // -x^2 => -(x^2)
    let expected = Expression::UnaryOp {
        op: UnaryOperator::Negate,
        operand: Box::new(Expression::BinaryOp {
            left: var(Variable::X),
            op: BinaryOperator::Power,
            right: num(2.0),
        }),
    };
    assert_eq!(parse("-x^2").unwrap(), expected);
}

#[test]
fn parser_allows_negative_exponent() {
    let expected = Expression::BinaryOp {
        left: num(2.0),
        op: BinaryOperator::Power,
        right: Box::new(Expression::UnaryOp {
            op: UnaryOperator::Negate,
            operand: num(1.0),
        }),
    };
    assert_eq!(parse("2^-1").unwrap(), expected);
}

#[test]
fn parser_parses_double_negation() {
    let expected = Expression::UnaryOp {
        op: UnaryOperator::Negate,
        operand: Box::new(Expression::UnaryOp {
            op: UnaryOperator::Negate,
            operand: var(Variable::X),
        }),
    };
    assert_eq!(parse("--x").unwrap(), expected);
}

// ========================================
// PARSER TESTS - FUNCTION CALLS
// ========================================

#[test]
fn parser_parses_unary_function() {
    assert_eq!(
        parse("sqrt(x)").unwrap(),
        Expression::FunctionCall {
            func: BuiltinFunction::Sqrt,
            args: vec![Expression::Variable(Variable::X)],
        }
    );
}

#[test]
fn parser_parses_binary_function() {
    assert_eq!(
        parse("atan2(y, x)").unwrap(),
        Expression::FunctionCall {
            func: BuiltinFunction::Atan2,
            args: vec![
                Expression::Variable(Variable::Y),
                Expression::Variable(Variable::X),
            ],
        }
    );
}

#[test]
fn parser_parses_variadic_max() {
    let result = parse("max(x, y, z, 0)").unwrap();
    match result {
        Expression::FunctionCall { func, args } => {
            assert_eq!(func, BuiltinFunction::Max);
            assert_eq!(args.len(), 4);
        }
        other => panic!("Expected function call, got {:?}", other),
    }
}

#[test]
fn parser_parses_nested_function_calls() {
    let result = parse("round(log10(abs(x) + 1), 2)").unwrap();
    assert_eq!(result.depth(), 5);
}

#[test]
fn parser_function_names_are_case_insensitive() {
    assert_eq!(parse("SQRT(X)").unwrap(), parse("sqrt(x)").unwrap());
}

#[test]
fn parser_knows_every_whitelisted_function() {
    for func in BuiltinFunction::ALL {
        assert_eq!(BuiltinFunction::from_name(func.name()), Some(func));
    }
}

// ========================================
// PARSER TESTS - ERRORS
// ========================================

#[test]
fn parser_rejects_empty_input() {
    assert_eq!(error_kind(""), ParseErrorKind::EmptyExpression);
    assert_eq!(error_kind("   "), ParseErrorKind::EmptyExpression);
}

#[test]
fn parser_rejects_dangling_operator() {
    let err = parse("x + ").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.position, 4);
}

#[test]
fn parser_rejects_unbalanced_parens() {
    assert_eq!(error_kind("(x + 1"), ParseErrorKind::UnbalancedParens);
    assert_eq!(error_kind("x + 1)"), ParseErrorKind::UnbalancedParens);
    assert_eq!(error_kind("sqrt(x"), ParseErrorKind::UnbalancedParens);
    assert_eq!(error_kind(")"), ParseErrorKind::UnbalancedParens);
}

#[test]
fn parser_rejects_unknown_identifiers() {
    let err = parse("x * foo").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownIdentifier);
    assert_eq!(err.position, 4);
    assert!(err.message.contains("foo"));
}

#[test]
fn parser_rejects_scripting_constructs() {
    assert_eq!(error_kind("Math.sqrt(x)"), ParseErrorKind::UnknownIdentifier);
    assert_eq!(error_kind("this.constructor"), ParseErrorKind::UnknownIdentifier);
    assert_eq!(error_kind("x = 3"), ParseErrorKind::UnexpectedToken);
    assert_eq!(error_kind("x; y"), ParseErrorKind::UnexpectedToken);
    assert_eq!(error_kind("\"x\""), ParseErrorKind::UnexpectedToken);
}

#[test]
fn parser_rejects_identifiers_containing_x() {
    // Textual substitution of "x" used to mangle names like "max" and "exp"
    assert_eq!(error_kind("xx"), ParseErrorKind::UnknownIdentifier);
    assert_eq!(error_kind("x2"), ParseErrorKind::UnknownIdentifier);
}

#[test]
fn parser_rejects_function_without_call() {
    assert_eq!(error_kind("sqrt + 1"), ParseErrorKind::UnexpectedToken);
}

#[test]
fn parser_rejects_calling_a_variable() {
    assert_eq!(error_kind("x(2)"), ParseErrorKind::UnexpectedToken);
}

#[test]
fn parser_rejects_wrong_argument_count() {
    let err = parse("sqrt(x, y)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ArgumentCount);
    assert_eq!(err.position, 0);

    assert_eq!(error_kind("pow(x)"), ParseErrorKind::ArgumentCount);
    assert_eq!(error_kind("max(x)"), ParseErrorKind::ArgumentCount);
    assert_eq!(error_kind("round(x, 1, 2)"), ParseErrorKind::ArgumentCount);
    assert_eq!(error_kind("abs()"), ParseErrorKind::ArgumentCount);
}

#[test]
fn parser_rejects_juxtaposed_operands() {
    assert_eq!(error_kind("2 x"), ParseErrorKind::UnexpectedToken);
    assert_eq!(error_kind("1.2.3"), ParseErrorKind::UnexpectedToken);
}

#[test]
fn parser_rejects_lone_dot() {
    assert_eq!(error_kind("."), ParseErrorKind::UnexpectedToken);
}

#[test]
fn parser_rejects_number_out_of_range() {
    let err = parse("x + 1e999").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.position, 4);
    assert!(err.message.contains("out of range"));

    assert!(parse("1e999 + x").is_err());
    assert!(parse("1e308 + x").is_ok());
}

// ========================================
// PARSER TESTS - DEPTH LIMITS
// ========================================

#[test]
fn parser_rejects_deeply_nested_parens() {
    let input = format!("{}x{}", "(".repeat(5_000), ")".repeat(5_000));
    assert_eq!(input.len(), 10_001);
    assert_eq!(error_kind(&input), ParseErrorKind::TooDeep);
}

#[test]
fn parser_rejects_unclosed_nesting_without_overflow() {
    let input = "(".repeat(10_000);
    assert_eq!(error_kind(&input), ParseErrorKind::TooDeep);
}

#[test]
fn parser_rejects_long_negation_chain() {
    let input = format!("{}x", "-".repeat(10_000));
    assert_eq!(error_kind(&input), ParseErrorKind::TooDeep);
}

#[test]
fn parser_rejects_long_operator_chain() {
    let input = vec!["x"; 10_000].join(" + ");
    assert_eq!(error_kind(&input), ParseErrorKind::TooDeep);
}

#[test]
fn parser_accepts_nesting_within_limit() {
    let input = format!("{}x{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(parse(&input).unwrap(), Expression::Variable(Variable::X));
}

#[test]
fn parser_honors_custom_depth_limit() {
    let options = ParserOptions { max_depth: 3 };
    assert!(parse_with_options("x + 1", options).is_ok());
    assert_eq!(
        parse_with_options("sqrt(abs(x + 1))", options).unwrap_err().kind,
        ParseErrorKind::TooDeep
    );
}

// ========================================
// AST TESTS
// ========================================

#[test]
fn parsing_is_idempotent() {
    for input in ["x * 9/5 + 32", "(x - 32) * 5/9", "sqrt(x) + pow(y, 2) - -z", "2^3^2"] {
        assert_eq!(parse(input).unwrap(), parse(input).unwrap());
    }
}

#[test]
fn ast_reports_depth() {
    assert_eq!(parse("x").unwrap().depth(), 1);
    assert_eq!(parse("x + 1").unwrap().depth(), 2);
    assert_eq!(parse("(x + 1) * 2").unwrap().depth(), 3);
}

#[test]
fn ast_collects_variables() {
    let expr = parse("x * y + sqrt(x) - PI").unwrap();
    let vars: Vec<Variable> = expr.variables().into_iter().collect();
    assert_eq!(vars, vec![Variable::X, Variable::Y]);
}

#[test]
fn ast_display_uses_minimal_parentheses() {
    assert_eq!(parse("x*9/5+32").unwrap().to_string(), "x * 9 / 5 + 32");
    assert_eq!(parse("(x-32)*5/9").unwrap().to_string(), "(x - 32) * 5 / 9");
    assert_eq!(parse("x - (y - z)").unwrap().to_string(), "x - (y - z)");
    assert_eq!(parse("(-x)^2").unwrap().to_string(), "(-x) ^ 2");
    assert_eq!(parse("-(x+1)").unwrap().to_string(), "-(x + 1)");
    assert_eq!(parse("MAX(x,PI)").unwrap().to_string(), "max(x, PI)");
}

#[test]
fn ast_display_round_trips_through_parser() {
    let inputs = [
        "x * 9/5 + 32",
        "(x - 32) * 5/9",
        "x / (y * z)",
        "2^3^2",
        "(2^3)^2",
        "-x^2",
        "x ^ -y",
        "x - -y",
        "--x",
        "atan2(y, x) * 180 / PI",
        "round(x * 1.60934, 2)",
        "min(x, max(y, z), 0.5)",
        "1e-7 + x",
    ];
    for input in inputs {
        let ast = parse(input).unwrap();
        let rendered = ast.to_string();
        assert_eq!(parse(&rendered).unwrap(), ast, "{} rendered as {}", input, rendered);
    }
}
