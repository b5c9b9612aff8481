//! Grid-level formula processing
//!
//! [`FormulaProcessor`] walks a grid, evaluates every formula cell, and keeps
//! the results keyed by position together with running statistics. One bad
//! formula produces one error entry; the scan itself never stops early.

use crate::classify::{leading_function_name, FormulaKind};
use crate::evaluator::{EvaluatedFormula, FormulaCalculator};
use ahash::AHashMap;
use sheetview_core::{CellError, CellValue, Grid};

/// Counters accumulated across processed formulas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaStatistics {
    /// Formula cells seen
    pub total: usize,
    /// Formulas that produced a value
    pub calculated: usize,
    /// Formulas that produced a spreadsheet error
    pub errored: usize,
    /// Uses per function name, uppercase
    pub function_usage: AHashMap<String, usize>,
    /// Occurrences per error kind
    pub error_counts: AHashMap<CellError, usize>,
}

impl FormulaStatistics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Evaluates every formula in a grid and retains the results
#[derive(Debug, Default)]
pub struct FormulaProcessor {
    stats: FormulaStatistics,
    results: AHashMap<String, EvaluatedFormula>,
}

impl FormulaProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a raw cell value is a formula cell
    pub fn is_formula_cell(value: &CellValue) -> bool {
        value.is_formula()
    }

    /// Evaluate every formula cell in the grid, row-major
    ///
    /// Results are keyed by `"{row}_{col}"`. Statistics accumulate across
    /// calls until [`reset_statistics`](Self::reset_statistics).
    pub fn process_grid(&mut self, grid: &Grid) {
        let mut calculator = FormulaCalculator::new(grid);

        for (row, col, value) in grid.cells() {
            let Some(text) = value.formula_text() else {
                continue;
            };

            let result = calculator.calculate(text);
            log::debug!(
                "cell ({}, {}): '{}' => {}",
                row,
                col,
                text,
                result.display()
            );

            self.stats.total += 1;
            match result.error {
                Some(e) => {
                    self.stats.errored += 1;
                    *self.stats.error_counts.entry(e).or_insert(0) += 1;
                }
                None => self.stats.calculated += 1,
            }
            if result.kind == FormulaKind::FunctionCall {
                if let Some(name) = leading_function_name(&result.source_text) {
                    *self.stats.function_usage.entry(name).or_insert(0) += 1;
                }
            }

            self.results.insert(format!("{}_{}", row, col), result);
        }

        log::info!(
            "processed {} formulas: {} calculated, {} errors",
            self.stats.total,
            self.stats.calculated,
            self.stats.errored
        );
    }

    /// Get the result for a cell by position
    pub fn get_formula(&self, row: usize, col: usize) -> Option<&EvaluatedFormula> {
        self.results.get(&format!("{}_{}", row, col))
    }

    /// All results, keyed by `"{row}_{col}"`
    pub fn results(&self) -> &AHashMap<String, EvaluatedFormula> {
        &self.results
    }

    pub fn statistics(&self) -> &FormulaStatistics {
        &self.stats
    }

    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }
}
