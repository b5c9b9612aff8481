//! Formula classification
//!
//! A formula is assigned exactly one [`FormulaKind`] by running an ordered
//! list of lexical predicates over its text; no AST is built. The order is
//! behaviorally significant: `IF(` must be recognized as Conditional before
//! the generic function-call check sees it.

use lazy_regex::{regex_captures, regex_is_match};
use std::fmt;

/// Lexical category of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaKind {
    /// Pure arithmetic over literals, e.g. "2+3*4"
    SimpleMath,
    /// A function call, e.g. "SUM(A1:A10)"
    FunctionCall,
    /// Exactly one bare cell token, e.g. "B2"
    CellReference,
    /// Brace syntax, e.g. "{1,2,3}"
    ArrayFormula,
    /// Anything containing IF(...)
    Conditional,
    /// Everything else, e.g. "A1*2+B1"
    Complex,
}

impl fmt::Display for FormulaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormulaKind::SimpleMath => "simple_math",
            FormulaKind::FunctionCall => "function",
            FormulaKind::CellReference => "reference",
            FormulaKind::ArrayFormula => "array",
            FormulaKind::Conditional => "conditional",
            FormulaKind::Complex => "complex",
        };
        write!(f, "{}", name)
    }
}

fn is_conditional(text: &str) -> bool {
    regex_is_match!(r"(?i)IF\(", text)
}

fn is_array(text: &str) -> bool {
    text.contains('{') && text.contains('}')
}

fn is_function_call(text: &str) -> bool {
    regex_is_match!(r"[A-Za-z]+\s*\(", text)
}

fn is_simple_math(text: &str) -> bool {
    regex_is_match!(r"^[0-9\s+\-*/().^%]+$", text)
}

fn is_cell_reference(text: &str) -> bool {
    regex_is_match!(r"^[A-Za-z]+[0-9]+$", text)
}

/// Ordered classifier predicates; first match wins, Complex is the fallback.
const CLASSIFIERS: &[(fn(&str) -> bool, FormulaKind)] = &[
    (is_conditional, FormulaKind::Conditional),
    (is_array, FormulaKind::ArrayFormula),
    (is_function_call, FormulaKind::FunctionCall),
    (is_simple_math, FormulaKind::SimpleMath),
    (is_cell_reference, FormulaKind::CellReference),
];

/// Classify formula text (without the leading '=')
pub fn classify(text: &str) -> FormulaKind {
    for (predicate, kind) in CLASSIFIERS {
        if predicate(text) {
            return *kind;
        }
    }
    FormulaKind::Complex
}

/// Extract the first function name in the text, uppercased
///
/// Used both for FunctionCall descriptions and for function usage statistics.
pub fn leading_function_name(text: &str) -> Option<String> {
    regex_captures!(r"([A-Za-z]+)\s*\(", text).map(|(_, name)| name.to_uppercase())
}

/// Human-readable description of a classified formula, for tooltips
pub fn describe(kind: FormulaKind, text: &str) -> String {
    match kind {
        FormulaKind::SimpleMath => "Arithmetic expression".to_string(),
        FormulaKind::CellReference => "Cell reference".to_string(),
        FormulaKind::ArrayFormula => "Array formula".to_string(),
        FormulaKind::Conditional => "Conditional formula".to_string(),
        FormulaKind::Complex => "Complex formula".to_string(),
        FormulaKind::FunctionCall => match leading_function_name(text) {
            Some(name) => format!("{} function call", name),
            None => "Function call".to_string(),
        },
    }
}
