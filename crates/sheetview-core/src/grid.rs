//! Read-only grid of cell values
//!
//! One pass of the formula engine works over a fully materialized, caller-owned
//! grid. Rows may be ragged (the ingestion layer does not pad short rows).

use crate::value::CellValue;

/// A sheet's worth of raw cell values, row-major and zero-based
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from rows of values
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Get the value at (row, col), or None when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of one row (rows may be ragged), or 0 when out of bounds
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.len())
    }

    /// Iterate over (row, col, value) triples in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &CellValue)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, v)| (r, c, v)))
    }
}

impl From<Vec<Vec<CellValue>>> for Grid {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec![CellValue::from("a"), CellValue::from(1.0)],
            vec![CellValue::from(2.0)],
        ])
    }

    #[test]
    fn test_get_in_and_out_of_bounds() {
        let grid = sample();
        assert_eq!(grid.get(0, 0), Some(&CellValue::from("a")));
        assert_eq!(grid.get(1, 0), Some(&CellValue::from(2.0)));
        assert_eq!(grid.get(1, 1), None); // Ragged row
        assert_eq!(grid.get(5, 0), None);
    }

    #[test]
    fn test_dimensions() {
        let grid = sample();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_len(0), 2);
        assert_eq!(grid.row_len(1), 1);
        assert_eq!(grid.row_len(9), 0);
    }

    #[test]
    fn test_cells_iteration_order() {
        let grid = sample();
        let coords: Vec<(usize, usize)> = grid.cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0)]);
    }
}
