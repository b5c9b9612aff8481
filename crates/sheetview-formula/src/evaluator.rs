//! Formula evaluation
//!
//! [`FormulaCalculator`] evaluates one formula at a time against a read-only
//! [`Grid`]. Evaluation is strictly by formula kind: arithmetic goes through
//! the expression interpreter, function calls through the registry, and
//! references are resolved textually against the grid. Spreadsheet errors are
//! values in the result, never Rust errors at this boundary.
//!
//! Reference misses are deliberately asymmetric: a single out-of-bounds or
//! blank cell reads as 0, while a missing cell inside a range is skipped
//! entirely (it contributes nothing to SUM rather than dragging AVERAGE
//! down).

use crate::arith;
use crate::classify::{self, FormulaKind};
use crate::dependency::extract_dependencies;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::{Argument, REGISTRY};
use crate::resolver::{parse_cell, parse_range};
use ahash::AHashSet;
use lazy_regex::{regex, regex_is_match};
use sheetview_core::{format_number, CellCoordinate, CellError, CellValue, Grid, Scalar};

/// Evaluating a formula that re-enters itself (through formula cells inside
/// ranges, or nested calls) stops at this depth.
const MAX_RECURSION_DEPTH: u32 = 10;

/// The complete outcome of evaluating one formula cell
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedFormula {
    /// Original formula text, leading '=' included
    pub source_text: String,
    pub kind: FormulaKind,
    /// The computed value; None exactly when `error` is Some
    pub value: Option<Scalar>,
    pub error: Option<CellError>,
    /// Reference tokens the formula mentions, verbatim
    pub dependencies: AHashSet<String>,
    /// Human-readable description for tooltips
    pub description: String,
}

impl EvaluatedFormula {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// What a renderer should show in the cell
    pub fn display(&self) -> String {
        match (&self.error, &self.value) {
            (Some(e), _) => e.as_str().to_string(),
            (None, Some(v)) => v.to_display(),
            (None, None) => String::new(),
        }
    }
}

/// Evaluates formulas against a grid
pub struct FormulaCalculator<'a> {
    grid: &'a Grid,
    depth: u32,
}

impl<'a> FormulaCalculator<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, depth: 0 }
    }

    /// Evaluate one formula
    ///
    /// `text` may carry the leading '='. Classification, dependencies and the
    /// description are always produced, even when evaluation fails. The
    /// recursion budget is per formula, so one deep formula cannot starve the
    /// next.
    pub fn calculate(&mut self, text: &str) -> EvaluatedFormula {
        let body = text.strip_prefix('=').unwrap_or(text).trim().to_string();
        let kind = classify::classify(&body);
        let dependencies = extract_dependencies(&body);
        let description = classify::describe(kind, &body);
        self.depth = 0;

        let (value, error) = match self.evaluate_body(&body, kind) {
            Ok(v) => (Some(v), None),
            Err(e) => {
                log::debug!("formula '{}' failed: {}", body, e);
                (None, Some(e.to_cell_error()))
            }
        };

        EvaluatedFormula {
            source_text: format!("={}", body),
            kind,
            value,
            error,
            dependencies,
            description,
        }
    }

    fn evaluate_body(&mut self, body: &str, kind: FormulaKind) -> FormulaResult<Scalar> {
        // An error literal like "=#REF!" passes through as that error.
        if let Some(e) = CellError::from_str(body) {
            return Err(e.into());
        }

        match kind {
            FormulaKind::SimpleMath => Ok(Scalar::Number(arith::evaluate_numeric(body)?)),
            FormulaKind::CellReference => self.resolve_scalar(parse_cell(body), body),
            FormulaKind::Conditional | FormulaKind::FunctionCall => self.evaluate_call(body),
            FormulaKind::Complex => self.evaluate_complex(body),
            FormulaKind::ArrayFormula => Err(FormulaError::Evaluation(
                "array formulas are not supported".to_string(),
            )),
        }
    }

    // === References ===

    /// Resolve a single cell reference to a scalar
    ///
    /// A blank or out-of-bounds cell reads as 0. Numeric text coerces to its
    /// number; other text stays text. A formula cell is evaluated in place,
    /// inside this formula's recursion budget.
    fn resolve_scalar(&mut self, coord: CellCoordinate, token: &str) -> FormulaResult<Scalar> {
        if !coord.is_valid() {
            return Err(FormulaError::InvalidReference(token.to_string()));
        }

        let cell = match self.grid.get(coord.row as usize, coord.col as usize) {
            Some(c) => c.clone(),
            None => return Ok(Scalar::Number(0.0)),
        };

        match cell {
            CellValue::Empty => Ok(Scalar::Number(0.0)),
            CellValue::Number(n) => Ok(Scalar::Number(n)),
            CellValue::Boolean(b) => Ok(Scalar::Boolean(b)),
            CellValue::Text(s) => {
                if s.starts_with('=') {
                    return self.evaluate_nested(&s);
                }
                if let Ok(n) = s.trim().parse::<f64>() {
                    Ok(Scalar::Number(n))
                } else {
                    Ok(Scalar::Text(s))
                }
            }
        }
    }

    /// Flatten a range into its numeric cell values, row-major
    ///
    /// Blank, missing and non-numeric cells are skipped. Formula cells are
    /// evaluated recursively; once the recursion budget is exhausted the list
    /// collected so far is returned rather than failing the whole formula. A
    /// range that cannot be resolved (column ranges like "A:B") yields no
    /// values at all, so `SUM(A:B)` is 0 rather than an error.
    fn resolve_range(&mut self, token: &str) -> Vec<f64> {
        let range = parse_range(token);
        if !range.is_valid() {
            log::debug!("unresolvable range '{}'; treating as empty", token);
            return Vec::new();
        }

        let (row_lo, row_hi) = ordered(range.start.row, range.end.row);
        let (col_lo, col_hi) = ordered(range.start.col, range.end.col);

        let mut numbers = Vec::new();
        'rows: for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                let cell = match self.grid.get(row as usize, col as usize) {
                    Some(c) => c.clone(),
                    None => continue,
                };
                match cell {
                    CellValue::Number(_) | CellValue::Boolean(_) => {
                        if let Some(n) = cell.as_number() {
                            numbers.push(n);
                        }
                    }
                    CellValue::Text(s) if s.starts_with('=') => {
                        if self.depth >= MAX_RECURSION_DEPTH {
                            log::warn!(
                                "recursion budget exhausted in range {}; returning partial values",
                                token
                            );
                            break 'rows;
                        }
                        if let Ok(scalar) = self.evaluate_nested(&s) {
                            if let Some(n) = scalar.as_number() {
                                numbers.push(n);
                            }
                        }
                    }
                    CellValue::Text(s) => {
                        if let Ok(n) = s.trim().parse::<f64>() {
                            numbers.push(n);
                        }
                    }
                    CellValue::Empty => {}
                }
            }
        }
        numbers
    }

    /// Evaluate a formula found while resolving this one
    fn evaluate_nested(&mut self, text: &str) -> FormulaResult<Scalar> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            self.depth -= 1;
            return Err(FormulaError::Evaluation(
                "maximum formula recursion depth exceeded".to_string(),
            ));
        }
        let body = text.strip_prefix('=').unwrap_or(text).trim();
        let result = self.evaluate_body(body, classify::classify(body));
        self.depth -= 1;
        result
    }

    // === Function calls ===

    /// Evaluate a formula containing function calls
    ///
    /// A body that is exactly one call dispatches through the registry. A
    /// mixed expression like "SUM(A1:A2)/2" has each embedded call replaced
    /// with its numeric value first and then goes through the expression
    /// interpreter.
    fn evaluate_call(&mut self, body: &str) -> FormulaResult<Scalar> {
        if let Some((name, args_text)) = full_call(body) {
            let mut args = Vec::new();
            for part in split_arguments(args_text) {
                args.push(self.evaluate_arg(&part)?);
            }
            return REGISTRY.call(name, &args);
        }

        let substituted = self.substitute_calls(body);
        let substituted = self.substitute_references(&substituted);
        arith::evaluate(&substituted)
    }

    /// Evaluate one function argument
    ///
    /// Tried in order: string literal, numeric literal, boolean literal,
    /// range, cell reference, nested function call, then arithmetic over
    /// substituted references. Text that fits none of these is passed through
    /// as text rather than failing the call.
    fn evaluate_arg(&mut self, text: &str) -> FormulaResult<Argument> {
        let text = text.trim();

        if let Some(inner) = string_literal(text) {
            return Ok(Argument::Value(Scalar::Text(inner.to_string())));
        }
        if let Ok(n) = text.parse::<f64>() {
            return Ok(Argument::Value(Scalar::Number(n)));
        }
        if text.eq_ignore_ascii_case("TRUE") {
            return Ok(Argument::Value(Scalar::Boolean(true)));
        }
        if text.eq_ignore_ascii_case("FALSE") {
            return Ok(Argument::Value(Scalar::Boolean(false)));
        }

        // Anything shaped like a range token goes through range resolution.
        if regex_is_match!(
            r"^(?:[A-Za-z_][A-Za-z0-9_]*!)?\$?[A-Za-z]+\$?[0-9]+:\$?[A-Za-z]+\$?[0-9]+$|^[A-Za-z]+:[A-Za-z]+$",
            text
        ) {
            return Ok(Argument::Numbers(self.resolve_range(text)));
        }

        let coord = parse_cell(text);
        if coord.is_valid() {
            return Ok(Argument::Value(self.resolve_scalar(coord, text)?));
        }

        if full_call(text).is_some() {
            return self.evaluate_nested(text).map(Argument::Value);
        }

        // Expressions: embedded calls and references become numbers, then
        // the interpreter runs. Text that fits nothing above passes through
        // as text rather than failing the call.
        let substituted = self.substitute_calls(text);
        let substituted = self.substitute_references(&substituted);
        match arith::evaluate(&substituted) {
            Ok(scalar) => Ok(Argument::Value(scalar)),
            Err(FormulaError::Cell(e)) => Err(e.into()),
            Err(_) => Ok(Argument::Value(Scalar::Text(text.to_string()))),
        }
    }

    // === Complex formulas ===

    /// Evaluate a mixed expression like "A1*2+B1"
    ///
    /// Every reference token is substituted with its numeric value ("0" when
    /// the cell has no numeric value), then the result goes through the
    /// expression interpreter.
    fn evaluate_complex(&mut self, body: &str) -> FormulaResult<Scalar> {
        let substituted = self.substitute_references(body);
        arith::evaluate(&substituted)
    }

    /// Replace every embedded function call with its numeric value
    ///
    /// Calls that evaluate to text, or fail, substitute as 0; each one runs
    /// inside this formula's recursion budget.
    fn substitute_calls(&mut self, text: &str) -> String {
        let call_start = regex!(r"[A-Za-z]+\(");

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(m) = call_start.find(rest) {
            let open = m.end() - 1;
            let Some(close) = matching_paren(rest, open) else {
                break;
            };
            out.push_str(&rest[..m.start()]);
            let value = match self.evaluate_nested(&rest[m.start()..=close]) {
                Ok(scalar) => scalar.as_number().unwrap_or(0.0),
                Err(_) => 0.0,
            };
            out.push_str(&format!("({})", format_number(value)));
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        out
    }

    /// Replace every cell token in the text with its numeric value
    fn substitute_references(&mut self, text: &str) -> String {
        let cell_token = regex!(r"(?:[A-Za-z_][A-Za-z0-9_]*!)?[A-Za-z]+[0-9]+");

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in cell_token.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            let value = match self.resolve_scalar(parse_cell(m.as_str()), m.as_str()) {
                Ok(scalar) => scalar.as_number().unwrap_or(0.0),
                Err(_) => 0.0,
            };
            // Parenthesized so a negative value cannot glue onto an operator.
            out.push_str(&format!("({})", format_number(value)));
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Split a body that is exactly one function call into (name, argument text)
///
/// Returns None when anything precedes the name or follows the closing
/// parenthesis, so "SUM(A1)+1" is an expression, not a call.
fn full_call(body: &str) -> Option<(&str, &str)> {
    let open = body.find('(')?;
    let name = body[..open].trim_end();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let close = matching_paren(body, open)?;
    if close != body.len() - 1 {
        return None;
    }
    Some((name, &body[open + 1..close]))
}

/// Index of the parenthesis matching the one at `open`, quote-aware
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0u32;
    let mut in_string = false;
    for (i, c) in text[open..].char_indices() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip the quotes off a double-quoted string literal
fn string_literal(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Split a function's argument text on top-level commas
///
/// Commas inside nested parentheses or quoted strings do not split. Empty
/// argument text yields no arguments at all.
fn split_arguments(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut paren_depth = 0u32;
    let mut in_string = false;

    for c in text.chars() {
        match c {
            '"' => {
                in_string = !in_string;
                current.push(c);
            }
            '(' if !in_string => {
                paren_depth += 1;
                current.push(c);
            }
            ')' if !in_string => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(c);
            }
            ',' if !in_string && paren_depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    parts.push(current.trim().to_string());
    parts
}
