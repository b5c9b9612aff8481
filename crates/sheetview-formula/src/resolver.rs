//! Reference resolver
//!
//! Pure text parsing of A1-style reference tokens into zero-based
//! coordinates. Tokens may be sheet-qualified ("Sheet1!A1") and may carry `$`
//! anchors ("$B$2"); anchors are accepted and ignored since the engine does
//! not distinguish absolute from relative references. A token that does not
//! match the grammar yields the sentinel coordinate instead of an error.

use lazy_regex::regex_captures;
use sheetview_core::coordinate::letters_to_column;
use sheetview_core::{CellCoordinate, CellRange};

/// Parse a single cell token
///
/// Grammar: `(SHEETNAME!)? $? COLLETTERS $? ROWDIGITS`, whole token. Column
/// letters are case-insensitive bijective base-26.
///
/// # Examples
/// ```
/// use sheetview_formula::resolver::parse_cell;
/// use sheetview_core::CellCoordinate;
///
/// assert_eq!(parse_cell("A1"), CellCoordinate::new(0, 0));
/// assert_eq!(parse_cell("$B$2"), CellCoordinate::new(1, 1));
/// assert_eq!(parse_cell("nope"), CellCoordinate::invalid());
/// ```
pub fn parse_cell(token: &str) -> CellCoordinate {
    let token = token.trim();

    let Some((_, sheet, letters, digits)) =
        regex_captures!(r"^(?:([^!]+)!)?\$?([A-Za-z]+)\$?([0-9]+)$", token)
    else {
        return CellCoordinate::invalid();
    };

    // Rows are 1-based in A1 notation; "A0" and unparsable row numbers are
    // mismatches, not panics.
    let row = match digits.parse::<i64>() {
        Ok(n) if n >= 1 => n - 1,
        _ => return CellCoordinate::invalid(),
    };

    let col = match letters_to_column(letters) {
        Ok(c) => c,
        Err(_) => return CellCoordinate::invalid(),
    };

    if sheet.is_empty() {
        CellCoordinate::new(row, col)
    } else {
        CellCoordinate::with_sheet(sheet, row, col)
    }
}

/// Parse a range token (`cell ":" cell`)
///
/// Each end is parsed independently via [`parse_cell`]; if either end fails,
/// the whole range is the sentinel. The range carries the starting end's
/// sheet qualifier.
pub fn parse_range(token: &str) -> CellRange {
    let token = token.trim();

    let Some((start_text, end_text)) = token.split_once(':') else {
        return CellRange::invalid();
    };

    let start = parse_cell(start_text);
    let end = parse_cell(end_text);
    if !start.is_valid() || !end.is_valid() {
        return CellRange::invalid();
    }

    CellRange::new(start, end)
}
