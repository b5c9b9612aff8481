//! Cell coordinates and ranges
//!
//! Coordinates are zero-based (A1 is row 0, col 0). A coordinate with
//! `row == -1 && col == -1` is the failure sentinel produced when a reference
//! token does not parse; it deliberately stays representable so reference
//! resolution never has to fail with an error.

use crate::error::{Error, Result};
use std::fmt;

/// A zero-based cell coordinate, optionally qualified by a sheet name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellCoordinate {
    /// Sheet name, if the reference was sheet-qualified (e.g. "Sheet1!A1")
    pub sheet: Option<String>,
    /// Row index (0-based; -1 for the failure sentinel)
    pub row: i64,
    /// Column index (0-based, A=0; -1 for the failure sentinel)
    pub col: i64,
}

impl CellCoordinate {
    /// Create a coordinate without a sheet qualifier
    pub fn new(row: i64, col: i64) -> Self {
        Self {
            sheet: None,
            row,
            col,
        }
    }

    /// Create a sheet-qualified coordinate
    pub fn with_sheet<S: Into<String>>(sheet: S, row: i64, col: i64) -> Self {
        Self {
            sheet: Some(sheet.into()),
            row,
            col,
        }
    }

    /// The failure sentinel for unparsable references
    pub fn invalid() -> Self {
        Self {
            sheet: None,
            row: -1,
            col: -1,
        }
    }

    /// Whether this coordinate points at an actual cell
    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    /// Canonical A1 rendering (e.g. "B3", "Sheet1!B3")
    ///
    /// The sentinel renders as "#REF!".
    pub fn to_a1(&self) -> String {
        if !self.is_valid() {
            return "#REF!".to_string();
        }
        let cell = format!("{}{}", column_to_letters(self.col), self.row + 1);
        match &self.sheet {
            Some(sheet) => format!("{}!{}", sheet, cell),
            None => cell,
        }
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// An inclusive rectangular range of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Sheet name, if the reference was sheet-qualified
    pub sheet: Option<String>,
    /// Top-left corner
    pub start: CellCoordinate,
    /// Bottom-right corner
    pub end: CellCoordinate,
}

impl CellRange {
    /// Create a new range from two corners
    pub fn new(start: CellCoordinate, end: CellCoordinate) -> Self {
        Self {
            sheet: start.sheet.clone(),
            start,
            end,
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: i64, start_col: i64, end_row: i64, end_col: i64) -> Self {
        Self::new(
            CellCoordinate::new(start_row, start_col),
            CellCoordinate::new(end_row, end_col),
        )
    }

    /// The failure sentinel for unparsable range references
    pub fn invalid() -> Self {
        Self::new(CellCoordinate::invalid(), CellCoordinate::invalid())
    }

    /// Whether both corners point at actual cells
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// Number of rows spanned (0 for the sentinel or a reversed range)
    pub fn row_count(&self) -> i64 {
        (self.end.row - self.start.row + 1).max(0)
    }

    /// Number of columns spanned
    pub fn col_count(&self) -> i64 {
        (self.end.col - self.start.col + 1).max(0)
    }

    /// Canonical A1 rendering (e.g. "A1:B5")
    pub fn to_a1(&self) -> String {
        if !self.is_valid() {
            return "#REF!".to_string();
        }
        let cells = format!(
            "{}{}:{}{}",
            column_to_letters(self.start.col),
            self.start.row + 1,
            column_to_letters(self.end.col),
            self.end.row + 1
        );
        match &self.sheet {
            Some(sheet) => format!("{}!{}", sheet, cells),
            None => cells,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Convert column letters to a 0-based index (A=0, Z=25, AA=26, ...)
///
/// Letters are case-insensitive bijective base-26. Errors on empty input or
/// non-alphabetic characters.
pub fn letters_to_column(letters: &str) -> Result<i64> {
    if letters.is_empty() {
        return Err(Error::InvalidColumnLetters(letters.to_string()));
    }

    let mut col: i64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumnLetters(letters.to_string()));
        }
        col = col * 26 + (c.to_ascii_uppercase() as i64 - 'A' as i64 + 1);
    }

    Ok(col - 1)
}

/// Convert a 0-based column index to letters (0=A, 25=Z, 26=AA, ...)
pub fn column_to_letters(col: i64) -> String {
    debug_assert!(col >= 0);
    let mut result = String::new();
    let mut n = col + 1; // 1-based for the bijective conversion

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("B").unwrap(), 1);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("AB").unwrap(), 27);
        assert_eq!(letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 0);
        assert_eq!(letters_to_column("aa").unwrap(), 26);

        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
    }

    #[test]
    fn test_coordinate_a1_rendering() {
        assert_eq!(CellCoordinate::new(0, 0).to_a1(), "A1");
        assert_eq!(CellCoordinate::new(99, 2).to_a1(), "C100");
        assert_eq!(CellCoordinate::with_sheet("Sheet1", 0, 0).to_a1(), "Sheet1!A1");
        assert_eq!(CellCoordinate::invalid().to_a1(), "#REF!");
    }

    #[test]
    fn test_range_a1_rendering() {
        let range = CellRange::from_indices(0, 0, 4, 1);
        assert_eq!(range.to_a1(), "A1:B5");
        assert_eq!(range.row_count(), 5);
        assert_eq!(range.col_count(), 2);
        assert!(!CellRange::invalid().is_valid());
    }

    #[test]
    fn test_sentinel() {
        let bad = CellCoordinate::invalid();
        assert_eq!(bad.row, -1);
        assert_eq!(bad.col, -1);
        assert!(!bad.is_valid());
        assert!(CellCoordinate::new(0, 0).is_valid());
    }
}
