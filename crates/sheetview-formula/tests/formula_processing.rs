//! End-to-end tests for whole-grid formula processing

use pretty_assertions::assert_eq;
use sheetview_core::{CellError, CellValue, Grid, Scalar};
use sheetview_formula::{FormulaKind, FormulaProcessor};

/// A small report sheet: headers, data, and a mix of formula styles
fn report_grid() -> Grid {
    Grid::from_rows(vec![
        vec![
            CellValue::from("Item"),
            CellValue::from("Amount"),
            CellValue::from("Derived"),
        ],
        vec![
            CellValue::from("widgets"),
            CellValue::from(100.0),
            CellValue::from("=B2*2"),
        ],
        vec![
            CellValue::from("gadgets"),
            CellValue::from(200.0),
            CellValue::from("=SUM(B2:B4)"),
        ],
        vec![
            CellValue::from("gizmos"),
            CellValue::from("150"),
            CellValue::from("=IF(B3>150,\"big\",\"small\")"),
        ],
        vec![
            CellValue::Empty,
            CellValue::Empty,
            CellValue::from("=1++2"),
        ],
    ])
}

/// Test that every formula cell produces exactly one result entry
#[test]
fn test_full_grid_coverage() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&report_grid());

    assert_eq!(processor.results().len(), 4);
    assert!(processor.get_formula(1, 2).is_some());
    assert!(processor.get_formula(2, 2).is_some());
    assert!(processor.get_formula(3, 2).is_some());
    assert!(processor.get_formula(4, 2).is_some());
    // Plain cells never get entries.
    assert!(processor.get_formula(0, 0).is_none());
    assert!(processor.get_formula(1, 1).is_none());
}

/// Test computed values, including numeric text inside a summed range
#[test]
fn test_computed_values() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&report_grid());

    assert_eq!(
        processor.get_formula(1, 2).and_then(|f| f.value.clone()),
        Some(Scalar::Number(200.0))
    );
    // B4 holds the text "150", which still counts toward the range sum.
    assert_eq!(
        processor.get_formula(2, 2).and_then(|f| f.value.clone()),
        Some(Scalar::Number(450.0))
    );
    assert_eq!(
        processor.get_formula(3, 2).and_then(|f| f.value.clone()),
        Some(Scalar::Text("big".into()))
    );
}

/// Test that a malformed formula errors its own cell and nothing else
#[test]
fn test_malformed_formula_is_contained() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&report_grid());

    let bad = processor.get_formula(4, 2).unwrap();
    assert_eq!(bad.error, Some(CellError::Value));
    assert_eq!(bad.value, None);
    assert_eq!(bad.display(), "#VALUE!");

    // All other formulas still calculated.
    let stats = processor.statistics();
    assert_eq!(stats.calculated, 3);
    assert_eq!(stats.errored, 1);
}

/// Test the statistics accounting identity
#[test]
fn test_statistics_identity() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&report_grid());

    let stats = processor.statistics();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.calculated + stats.errored, stats.total);
    assert_eq!(stats.function_usage.get("SUM"), Some(&1));
    // The IF formula is Conditional, so it is not counted as function usage.
    assert_eq!(stats.function_usage.get("IF"), None);
    assert_eq!(stats.error_counts.get(&CellError::Value), Some(&1));
}

/// Test classification attached to processed results
#[test]
fn test_result_kinds_and_descriptions() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&report_grid());

    let sum = processor.get_formula(2, 2).unwrap();
    assert_eq!(sum.kind, FormulaKind::FunctionCall);
    assert_eq!(sum.description, "SUM function call");
    assert_eq!(sum.source_text, "=SUM(B2:B4)");

    let conditional = processor.get_formula(3, 2).unwrap();
    assert_eq!(conditional.kind, FormulaKind::Conditional);
    assert_eq!(conditional.description, "Conditional formula");
}

/// Test dependency sets on processed results
#[test]
fn test_result_dependencies() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&report_grid());

    let sum = processor.get_formula(2, 2).unwrap();
    assert!(sum.dependencies.contains("B2:B4"));
    assert!(!sum.dependencies.contains("B2"));
    assert_eq!(sum.dependencies.len(), 1);
}

/// Test processing an empty grid
#[test]
fn test_empty_grid() {
    let mut processor = FormulaProcessor::new();
    processor.process_grid(&Grid::new());

    assert!(processor.results().is_empty());
    assert_eq!(processor.statistics().total, 0);
}

/// Test statistics accumulation across passes and explicit reset
#[test]
fn test_statistics_accumulate_until_reset() {
    let grid = Grid::from_rows(vec![vec![CellValue::from("=1+1")]]);
    let mut processor = FormulaProcessor::new();

    processor.process_grid(&grid);
    processor.process_grid(&grid);
    assert_eq!(processor.statistics().total, 2);

    processor.reset_statistics();
    assert_eq!(processor.statistics().total, 0);
}
