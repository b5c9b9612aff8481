//! Dependency extraction
//!
//! Collects the cell and range tokens a formula references, textually. The
//! result is used for display and debugging only, never for recalculation
//! ordering, so tokens are kept verbatim (sheet qualifiers included) and the
//! set is order-irrelevant.

use ahash::AHashSet;
use lazy_regex::regex;

fn overlaps(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start < e && s < end)
}

/// Extract the deduplicated set of reference tokens from formula text
///
/// Tokens are collected in priority order: sheet-qualified cell/range tokens,
/// bare ranges, bare column ranges, then bare cells. A bare cell that is a
/// substring of an already-collected range token is dropped so that "A1"
/// inside "A1:B5" is not double-counted.
pub fn extract_dependencies(text: &str) -> AHashSet<String> {
    let sheet_ref =
        regex!(r"[A-Za-z_][A-Za-z0-9_]*![A-Za-z]+[0-9]+(?::[A-Za-z]+[0-9]+)?");
    let bare_range = regex!(r"[A-Za-z]+[0-9]+:[A-Za-z]+[0-9]+");
    let col_range = regex!(r"[A-Za-z]+:[A-Za-z]+");
    let bare_cell = regex!(r"[A-Za-z]+[0-9]+");

    let mut deps: AHashSet<String> = AHashSet::new();
    // Spans already claimed by higher-priority tokens; later tiers must not
    // re-match inside them (e.g. the "Sheet1" of "Sheet1!A1" looks like a
    // bare cell token on its own).
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut ranges: Vec<String> = Vec::new();

    for m in sheet_ref.find_iter(text) {
        spans.push((m.start(), m.end()));
        let token = m.as_str().to_string();
        if token.contains(':') {
            ranges.push(token.clone());
        }
        deps.insert(token);
    }

    for m in bare_range.find_iter(text) {
        if overlaps(&spans, m.start(), m.end()) {
            continue;
        }
        spans.push((m.start(), m.end()));
        ranges.push(m.as_str().to_string());
        deps.insert(m.as_str().to_string());
    }

    for m in col_range.find_iter(text) {
        if overlaps(&spans, m.start(), m.end()) {
            continue;
        }
        spans.push((m.start(), m.end()));
        ranges.push(m.as_str().to_string());
        deps.insert(m.as_str().to_string());
    }

    for m in bare_cell.find_iter(text) {
        if overlaps(&spans, m.start(), m.end()) {
            continue;
        }
        let token = m.as_str();
        if ranges.iter().any(|r| r.contains(token)) {
            continue;
        }
        deps.insert(token.to_string());
    }

    deps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(text: &str) -> AHashSet<String> {
        extract_dependencies(text)
    }

    #[test]
    fn test_bare_cells() {
        let d = deps("A1+B2");
        assert!(d.contains("A1"));
        assert!(d.contains("B2"));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_range_suppresses_member_cells() {
        let d = deps("SUM(A1:A10)");
        assert!(d.contains("A1:A10"));
        assert!(!d.contains("A1"));
        assert!(!d.contains("A10"));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_range_plus_unrelated_cell() {
        let d = deps("SUM(A1:A10)+B1");
        assert_eq!(d, ["A1:A10", "B1"].iter().map(|s| s.to_string()).collect());
    }

    #[test]
    fn test_sheet_qualified_tokens() {
        let d = deps("Sheet1!A1+Sheet2!B2");
        assert!(d.contains("Sheet1!A1"));
        assert!(d.contains("Sheet2!B2"));
        // The sheet names must not leak out as bare cell tokens.
        assert_eq!(d.len(), 2);

        let d = deps("SUM(Data!A1:B5)");
        assert!(d.contains("Data!A1:B5"));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_column_range() {
        let d = deps("SUM(A:B)");
        assert!(d.contains("A:B"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let d = deps("A1+A1+A1");
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_no_references() {
        assert!(deps("1+2*3").is_empty());
    }
}
