//! # sheetview-core
//!
//! Core data model for the sheetview formula engine.
//!
//! This crate provides the types shared between the formula engine and the
//! rendering layer:
//! - [`CellValue`] - Raw grid cell contents (numbers, strings, booleans)
//! - [`Scalar`] - An evaluated formula result
//! - [`CellError`] - The closed spreadsheet error taxonomy (#REF!, #DIV/0!, ...)
//! - [`CellCoordinate`] and [`CellRange`] - Zero-based cell addressing
//! - [`Grid`] - A read-only view over one sheet's values
//!
//! ## Example
//!
//! ```rust
//! use sheetview_core::{CellValue, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![CellValue::from("Price"), CellValue::from("Qty")],
//!     vec![CellValue::from(9.5), CellValue::from(3.0)],
//! ]);
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.get(1, 0).and_then(|c| c.as_number()), Some(9.5));
//! ```

pub mod coordinate;
pub mod error;
pub mod grid;
pub mod value;

// Re-exports for convenience
pub use coordinate::{CellCoordinate, CellRange};
pub use error::{Error, Result};
pub use grid::Grid;
pub use value::{format_number, CellError, CellValue, Scalar};
