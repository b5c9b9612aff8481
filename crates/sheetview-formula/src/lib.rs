//! # sheetview-formula
//!
//! Formula parsing and evaluation for sheetview grids.
//!
//! The engine works in three layers:
//! - [`classify`] assigns each formula a [`FormulaKind`] with ordered lexical
//!   checks, and [`dependency`] extracts the references it mentions
//! - [`FormulaCalculator`] evaluates one formula against a read-only
//!   [`Grid`](sheetview_core::Grid), routing by kind through the expression
//!   interpreter, the reference resolver, and the function registry
//! - [`FormulaProcessor`] drives a whole-grid pass and accumulates statistics
//!
//! Spreadsheet errors (#DIV/0!, #REF!, ...) are values inside results; a bad
//! formula yields an error entry for its cell and the pass keeps going.
//!
//! ## Example
//!
//! ```rust
//! use sheetview_core::{CellValue, Grid};
//! use sheetview_formula::FormulaProcessor;
//!
//! let grid = Grid::from_rows(vec![
//!     vec![CellValue::from(100.0)],
//!     vec![CellValue::from(150.0)],
//!     vec![CellValue::from("=SUM(A1:A2)")],
//! ]);
//!
//! let mut processor = FormulaProcessor::new();
//! processor.process_grid(&grid);
//! assert_eq!(processor.get_formula(2, 0).unwrap().display(), "250");
//! ```

pub mod arith;
pub mod classify;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod processor;
pub mod resolver;

// Re-exports for convenience
pub use classify::{classify, describe, leading_function_name, FormulaKind};
pub use dependency::extract_dependencies;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{EvaluatedFormula, FormulaCalculator};
pub use functions::{Argument, FunctionRegistry, REGISTRY};
pub use processor::{FormulaProcessor, FormulaStatistics};
