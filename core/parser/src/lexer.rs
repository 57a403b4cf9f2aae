//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It handles
//! whitespace skipping, number parsing (including scientific notation)
//! and identifier normalization. Every token remembers the byte offset
//! where it started so parse errors can point at the offending input.
//!
//! SUPPORTED OPERATORS:
//! - Single char: + - * / ^ ( ) ,

use crate::token::Token;
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    input: Peekable<CharIndices<'a>>,
    len: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.char_indices().peekable(),
            len: input.len(),
            token_start: 0,
        }
    }

    /// Byte offset of the token most recently returned by `next_token`.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let (start, ch) = match self.input.next() {
            Some(pair) => pair,
            None => {
                self.token_start = self.len;
                return Token::EOF;
            }
        };
        self.token_start = start;

        match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Asterisk,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,

            // Numbers start with a digit or a dot (".5")
            ch if ch.is_ascii_digit() || ch == '.' => self.read_number(ch),

            ch if is_letter(ch) => self.read_identifier(ch),

            ch => Token::Illegal(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().map(|&(_, ch)| ch)
    }

    fn read_number(&mut self, first_char: char) -> Token {
        let mut number_str = String::from(first_char);
        let mut has_dot = first_char == '.';

        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.input.next();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number_str.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        if self.exponent_follows() {
            self.read_exponent(&mut number_str);
        }

        match number_str.parse::<f64>() {
            Ok(n) => Token::Number(n),
            // Lone "." or similar
            Err(_) => Token::Illegal(first_char),
        }
    }

    /// True when the next chars are `e5`, `E-3`, `e+2`: an exponent rather
    /// than a trailing identifier such as the constant `e`.
    fn exponent_follows(&self) -> bool {
        let mut ahead = self.input.clone();
        match ahead.next() {
            Some((_, 'e')) | Some((_, 'E')) => {}
            _ => return false,
        }
        match ahead.next() {
            Some((_, d)) if d.is_ascii_digit() => true,
            Some((_, '+')) | Some((_, '-')) => {
                matches!(ahead.next(), Some((_, d)) if d.is_ascii_digit())
            }
            _ => false,
        }
    }

    fn read_exponent(&mut self, number_str: &mut String) {
        // 'e' / 'E'
        if let Some((_, ch)) = self.input.next() {
            number_str.push(ch);
        }
        if let Some(sign @ ('+' | '-')) = self.peek_char() {
            number_str.push(sign);
            self.input.next();
        }
        while let Some(ch) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            number_str.push(ch);
            self.input.next();
        }
    }

    fn read_identifier(&mut self, first_char: char) -> Token {
        let mut ident = String::from(first_char);

        while let Some(ch) = self.peek_char() {
            if is_letter(ch) || ch.is_ascii_digit() {
                ident.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        // Normalize to lowercase so "PI", "Pi" and "pi" are the same name
        Token::Identifier(ident.to_ascii_lowercase())
    }
}

/// Returns true if `ch` can start an identifier.
fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}
