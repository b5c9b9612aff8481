//! Arithmetic interpreter
//!
//! A small, explicitly-scoped expression interpreter: numeric literals,
//! `+ - * / ^ %`, parentheses and unary minus, plus the comparison operators
//! (`= <> < <= > >=`) at lowest precedence for function-argument conditions
//! like `5>3`. Formula text never reaches any host-level evaluation
//! machinery; this module is the only thing that executes it.
//!
//! Precedence, loosest to tightest: comparison, `+ -`, `* / %`, unary minus,
//! `^` (right-associative). Division and modulo by zero are spreadsheet
//! errors, not panics.

use crate::error::{FormulaError, FormulaResult};
use lazy_regex::regex_is_match;
use sheetview_core::{CellError, Scalar};

/// Evaluate an expression to a scalar
///
/// Comparisons produce booleans; everything else produces numbers. Syntax
/// problems surface as [`FormulaError::Parse`].
pub fn evaluate(text: &str) -> FormulaResult<Scalar> {
    let mut parser = ExprParser::new(text);
    let value = parser.parse_comparison()?;
    parser.expect_end()?;
    Ok(value)
}

/// Evaluate a sanitized arithmetic expression to a number
///
/// This is the SimpleMath entry point: the malformed-expression screen runs
/// first (a leading or trailing binary operator, or two adjacent operator
/// characters, is a VALUE error before any parsing), and the result must be
/// numeric.
pub fn evaluate_numeric(text: &str) -> FormulaResult<f64> {
    let text = text.trim();
    if is_malformed(text) {
        return Err(CellError::Value.into());
    }

    match evaluate(text)? {
        Scalar::Number(n) => Ok(n),
        _ => Err(CellError::Value.into()),
    }
}

/// Lexical screen for obviously broken arithmetic
///
/// A leading `-` is unary minus and allowed; every other leading operator,
/// any trailing operator, and any doubled operator run is malformed.
fn is_malformed(text: &str) -> bool {
    regex_is_match!(r"[+\-*/^%]{2,}", text)
        || regex_is_match!(r"^[+*/^%]", text)
        || regex_is_match!(r"[+\-*/^%]$", text)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    LeftParen,
    RightParen,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Eof,
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    current: Token,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current: Token::Eof,
        };
        // Sets `current`; a scan error shows up on the first advance below.
        parser.current = parser.scan_token().unwrap_or(Token::Eof);
        parser
    }

    // === Token scanning ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.bump();
        }
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '%' => Token::Percent,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '=' => Token::Equal,
            '<' => {
                self.bump();
                return Ok(match self.peek_char() {
                    Some('=') => {
                        self.bump();
                        Token::LessEqual
                    }
                    Some('>') => {
                        self.bump();
                        Token::NotEqual
                    }
                    _ => Token::LessThan,
                });
            }
            '>' => {
                self.bump();
                return Ok(match self.peek_char() {
                    Some('=') => {
                        self.bump();
                        Token::GreaterEqual
                    }
                    _ => Token::GreaterThan,
                });
            }
            c if c.is_ascii_digit() || c == '.' => return self.scan_number(),
            c => {
                return Err(FormulaError::Parse(format!(
                    "Unexpected character '{}' in expression",
                    c
                )))
            }
        };

        self.bump();
        Ok(token)
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_digit() || c == '.')
        {
            self.bump();
        }

        let text = &self.input[start..self.pos];
        let n: f64 = text
            .parse()
            .map_err(|_| FormulaError::Parse(format!("Invalid number: '{}'", text)))?;
        Ok(Token::Number(n))
    }

    fn advance(&mut self) -> FormulaResult<()> {
        self.current = self.scan_token()?;
        Ok(())
    }

    fn expect_end(&mut self) -> FormulaResult<()> {
        if self.current != Token::Eof {
            return Err(FormulaError::Parse(format!(
                "Unexpected trailing input in '{}'",
                self.input
            )));
        }
        Ok(())
    }

    // === Grammar ===

    fn parse_comparison(&mut self) -> FormulaResult<Scalar> {
        let left = self.parse_additive()?;

        let op = match self.current {
            Token::Equal => Token::Equal,
            Token::NotEqual => Token::NotEqual,
            Token::LessThan => Token::LessThan,
            Token::LessEqual => Token::LessEqual,
            Token::GreaterThan => Token::GreaterThan,
            Token::GreaterEqual => Token::GreaterEqual,
            _ => return Ok(Scalar::Number(left)),
        };
        self.advance()?;
        let right = self.parse_additive()?;

        let result = match op {
            Token::Equal => left == right,
            Token::NotEqual => left != right,
            Token::LessThan => left < right,
            Token::LessEqual => left <= right,
            Token::GreaterThan => left > right,
            Token::GreaterEqual => left >= right,
            _ => unreachable!(),
        };
        Ok(Scalar::Boolean(result))
    }

    fn parse_additive(&mut self) -> FormulaResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            match self.current {
                Token::Plus => {
                    self.advance()?;
                    value += self.parse_term()?;
                }
                Token::Minus => {
                    self.advance()?;
                    value -= self.parse_term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_term(&mut self) -> FormulaResult<f64> {
        let mut value = self.parse_unary()?;
        loop {
            match self.current {
                Token::Star => {
                    self.advance()?;
                    value *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.advance()?;
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err(CellError::Div0.into());
                    }
                    value /= divisor;
                }
                Token::Percent => {
                    self.advance()?;
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err(CellError::Div0.into());
                    }
                    // Result takes the divisor's sign, spreadsheet-style.
                    value -= divisor * (value / divisor).floor();
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_unary(&mut self) -> FormulaResult<f64> {
        if self.current == Token::Minus {
            self.advance()?;
            return Ok(-self.parse_unary()?);
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> FormulaResult<f64> {
        let base = self.parse_primary()?;
        if self.current == Token::Caret {
            self.advance()?;
            let exponent = self.parse_power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> FormulaResult<f64> {
        match self.current {
            Token::Number(n) => {
                self.advance()?;
                Ok(n)
            }
            Token::LeftParen => {
                self.advance()?;
                let value = self.parse_additive()?;
                if self.current != Token::RightParen {
                    return Err(FormulaError::Parse("Expected ')'".to_string()));
                }
                self.advance()?;
                Ok(value)
            }
            _ => Err(FormulaError::Parse(format!(
                "Unexpected token in '{}'",
                self.input
            ))),
        }
    }
}
