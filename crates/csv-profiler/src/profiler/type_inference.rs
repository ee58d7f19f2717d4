//! Type inference logic for column analysis.
//!
//! A column is numeric only if every non-missing value is a plain decimal
//! literal. One stray token is enough to make it text.

use crate::types::{Cell, Kind};
use once_cell::sync::Lazy;
use regex::Regex;

// Signed decimal with optional fraction and exponent: "42", "-3.5", ".5", "5.", "1e-3".
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$")
        .expect("Invalid regex: numeric literal")
});

/// Parse a raw cell as a finite decimal number.
///
/// Surrounding whitespace is ignored. Special tokens (`inf`, `NaN`), hex,
/// thousands separators and literals that overflow `f64` are rejected.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_ascii();
    if !NUMERIC_LITERAL.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Check if a raw cell parses as a number.
pub fn is_numeric_string(raw: &str) -> bool {
    parse_numeric(raw).is_some()
}

/// Decide the kind of a column from its raw cells.
///
/// An all-missing column is `Text`: it cannot be shown to be numeric.
pub fn classify(values: &[Cell]) -> Kind {
    let mut present = values.iter().filter_map(Cell::as_str).peekable();
    if present.peek().is_none() {
        return Kind::Text;
    }

    if present.all(is_numeric_string) {
        Kind::Numeric
    } else {
        Kind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[Option<&str>]) -> Vec<Cell> {
        raw.iter().copied().map(Cell::from).collect()
    }

    // ==================== parse_numeric tests ====================

    #[test]
    fn test_parse_integers_and_floats() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric("-7"), Some(-7.0));
        assert_eq!(parse_numeric("+3.25"), Some(3.25));
        assert_eq!(parse_numeric(".5"), Some(0.5));
        assert_eq!(parse_numeric("5."), Some(5.0));
    }

    #[test]
    fn test_parse_exponent_forms() {
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("2.5E-2"), Some(0.025));
        assert_eq!(parse_numeric("-1e+2"), Some(-100.0));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!(parse_numeric("  12  "), Some(12.0));
        assert_eq!(parse_numeric("\t-1.5\n"), Some(-1.5));
    }

    #[test]
    fn test_parse_rejects_special_tokens() {
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("-infinity"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("0x1F"), None);
    }

    #[test]
    fn test_parse_rejects_formatted_numbers() {
        assert_eq!(parse_numeric("1,234"), None);
        assert_eq!(parse_numeric("$5"), None);
        assert_eq!(parse_numeric("12%"), None);
        assert_eq!(parse_numeric("1 000"), None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("."), None);
        assert_eq!(parse_numeric("e5"), None);
        assert_eq!(parse_numeric("1e"), None);
        assert_eq!(parse_numeric("--1"), None);
        assert_eq!(parse_numeric("1.2.3"), None);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(parse_numeric("1e400"), None);
        assert!(parse_numeric("1e300").is_some());
    }

    // ==================== classify tests ====================

    #[test]
    fn test_classify_all_numeric() {
        let values = cells(&[Some("1"), Some("2"), Some("3")]);
        assert_eq!(classify(&values), Kind::Numeric);
    }

    #[test]
    fn test_classify_single_non_numeric_forces_text() {
        let values = cells(&[Some("1"), Some("2"), Some("x")]);
        assert_eq!(classify(&values), Kind::Text);
    }

    #[test]
    fn test_classify_ignores_missing_cells() {
        let values = cells(&[Some("1.5"), None, Some("-2"), None]);
        assert_eq!(classify(&values), Kind::Numeric);
    }

    #[test]
    fn test_classify_all_missing_is_text() {
        let values = cells(&[None, None, None]);
        assert_eq!(classify(&values), Kind::Text);
    }

    #[test]
    fn test_classify_empty_column_is_text() {
        assert_eq!(classify(&[]), Kind::Text);
    }

    #[test]
    fn test_classify_present_empty_string_is_text() {
        // An empty string that was actually recorded is not a number.
        let values = vec![Cell::present("1"), Cell::present("")];
        assert_eq!(classify(&values), Kind::Text);
    }

    #[test]
    fn test_classify_mostly_numeric_is_still_text() {
        let mut raw: Vec<Option<&str>> = vec![Some("1"); 99];
        raw.push(Some("n/a"));
        assert_eq!(classify(&cells(&raw)), Kind::Text);
    }
}
