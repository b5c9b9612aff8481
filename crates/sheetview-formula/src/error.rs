//! Formula engine error types
//!
//! Two layers exist deliberately. Spreadsheet-visible errors ([`CellError`])
//! are values carried inside results and never cross the engine boundary as
//! Rust errors. [`FormulaError`] is the internal fault channel; whatever
//! reaches the per-cell boundary is folded back into a [`CellError`] via
//! [`FormulaError::to_cell_error`], so one bad cell can never take down a
//! grid scan.

use sheetview_core::CellError;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, Error)]
pub enum FormulaError {
    /// Expression parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Reference to an invalid cell
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A spreadsheet error value produced during evaluation
    #[error("{0}")]
    Cell(CellError),
}

impl FormulaError {
    /// Fold this fault into the spreadsheet error shown for the cell
    pub fn to_cell_error(&self) -> CellError {
        match self {
            FormulaError::Cell(e) => *e,
            FormulaError::UnknownFunction(_) => CellError::Name,
            FormulaError::InvalidReference(_) => CellError::Ref,
            _ => CellError::Value,
        }
    }
}

impl From<CellError> for FormulaError {
    fn from(e: CellError) -> Self {
        FormulaError::Cell(e)
    }
}
