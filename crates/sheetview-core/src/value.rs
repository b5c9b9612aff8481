//! Cell value types
//!
//! [`CellValue`] is what the ingestion layer hands us: the raw contents of a
//! grid cell. [`Scalar`] is what the formula engine produces. [`CellError`]
//! is the closed set of spreadsheet error codes with their exact display
//! strings.

use std::fmt;

/// Raw contents of a grid cell
///
/// Formula cells are not a separate variant: any [`CellValue::Text`] whose
/// content begins with `=` is treated as a formula by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell (no value)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// String value, possibly a formula if it starts with '='
    Text(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell holds a formula (text beginning with '=')
    pub fn is_formula(&self) -> bool {
        self.formula_text().is_some()
    }

    /// Get the formula text (including the leading '=') if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) if s.starts_with('=') => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a number
    ///
    /// Booleans coerce to 1/0. Text never coerces here; textual coercion is a
    /// policy decision that belongs to the evaluator.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Get the text content, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// One evaluated formula value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl Scalar {
    /// Get the value as a number, if it has one
    ///
    /// Booleans coerce to 1/0; text does not coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Boolean(true) => Some(1.0),
            Scalar::Boolean(false) => Some(0.0),
            Scalar::Text(_) => None,
        }
    }

    /// Truthiness for logical functions: nonzero numbers and non-empty text
    /// are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Number(n) => *n != 0.0,
            Scalar::Boolean(b) => *b,
            Scalar::Text(s) => !s.is_empty(),
        }
    }

    /// Display form, as a renderer would show it
    ///
    /// Whole numbers render without a trailing ".0".
    pub fn to_display(&self) -> String {
        match self {
            Scalar::Number(n) => format_number(*n),
            Scalar::Text(s) => s.clone(),
            Scalar::Boolean(true) => "TRUE".to_string(),
            Scalar::Boolean(false) => "FALSE".to_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// Format a number the way spreadsheets display it: integral values without a
/// decimal point, everything else via the shortest f64 representation.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Spreadsheet error values
///
/// The taxonomy is closed; display strings round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    /// #REF! - Invalid cell reference
    Ref,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Wrong type of argument or operand
    Value,
    /// #NAME? - Unrecognized formula name
    Name,
    /// #NUM! - Invalid numeric value
    Num,
    /// #N/A - Value not available
    Na,
    /// #NULL! - Incorrect range operator
    Null,
}

impl CellError {
    /// All error kinds, for iteration
    pub const ALL: [CellError; 7] = [
        CellError::Ref,
        CellError::Div0,
        CellError::Value,
        CellError::Name,
        CellError::Num,
        CellError::Na,
        CellError::Null,
    ];

    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Ref => "#REF!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
            CellError::Null => "#NULL!",
        }
    }

    /// Parse an error display string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#REF!" => Some(CellError::Ref),
            "#DIV/0!" => Some(CellError::Div0),
            "#VALUE!" => Some(CellError::Value),
            "#NAME?" => Some(CellError::Name),
            "#NUM!" => Some(CellError::Num),
            "#N/A" => Some(CellError::Na),
            "#NULL!" => Some(CellError::Null),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_detection() {
        assert!(CellValue::from("=SUM(A1:A10)").is_formula());
        assert!(CellValue::from("=A1+B1").is_formula());
        assert!(!CellValue::from("123").is_formula());
        assert!(!CellValue::from("text").is_formula());
        assert!(!CellValue::from("").is_formula());
        assert!(!CellValue::Number(1.0).is_formula());
    }

    #[test]
    fn test_cell_value_as_number() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::Boolean(false).as_number(), Some(0.0));
        assert_eq!(CellValue::from("5").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_scalar_truthiness() {
        assert!(Scalar::Number(1.0).is_truthy());
        assert!(!Scalar::Number(0.0).is_truthy());
        assert!(Scalar::Boolean(true).is_truthy());
        assert!(!Scalar::Text(String::new()).is_truthy());
        assert!(Scalar::from("x").is_truthy());
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Number(450.0).to_display(), "450");
        assert_eq!(Scalar::Number(3.14).to_display(), "3.14");
        assert_eq!(Scalar::Number(-2.0).to_display(), "-2");
        assert_eq!(Scalar::Boolean(true).to_display(), "TRUE");
        assert_eq!(Scalar::from("hi").to_display(), "hi");
    }

    #[test]
    fn test_cell_error_display() {
        assert_eq!(CellError::Div0.to_string(), "#DIV/0!");
        assert_eq!(CellError::Value.to_string(), "#VALUE!");
        assert_eq!(CellError::Na.to_string(), "#N/A");
        assert_eq!(CellError::Name.to_string(), "#NAME?");
    }

    #[test]
    fn test_cell_error_round_trip() {
        for err in CellError::ALL {
            assert_eq!(CellError::from_str(err.as_str()), Some(err));
        }
        assert_eq!(CellError::from_str("#n/a"), Some(CellError::Na)); // Case insensitive
        assert_eq!(CellError::from_str("invalid"), None);
    }
}
