//! The ordered quality rule table.
//!
//! Each rule is a plain data entry: a precondition deciding whether the rule
//! applies to a column at all, a predicate over the computed metrics, and a
//! constructor for the finding. Adding a rule means adding one entry.

use crate::config::ProfilerConfig;
use crate::types::{ColumnReport, FindingKind, Kind, QualityFinding, Severity};

/// One entry of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct QualityRule {
    pub kind: FindingKind,
    pub severity: Severity,
    /// Whether the rule is evaluated for this column at all.
    pub applies: fn(&ColumnReport, &ProfilerConfig) -> bool,
    /// Whether the rule fires.
    pub check: fn(&ColumnReport, &ProfilerConfig) -> bool,
    /// Human-readable message for a fired rule.
    pub message: fn(&ColumnReport, &ProfilerConfig) -> String,
}

impl QualityRule {
    pub fn finding(&self, report: &ColumnReport, config: &ProfilerConfig) -> QualityFinding {
        QualityFinding {
            kind: self.kind,
            severity: self.severity,
            message: (self.message)(report, config),
        }
    }
}

/// All rules, in evaluation order.
pub static RULES: [QualityRule; 6] = [
    QualityRule {
        kind: FindingKind::HighMissing,
        severity: Severity::Warning,
        applies: always,
        check: high_missing,
        message: missing_message,
    },
    QualityRule {
        kind: FindingKind::ModerateMissing,
        severity: Severity::Info,
        applies: always,
        check: moderate_missing,
        message: missing_message,
    },
    QualityRule {
        kind: FindingKind::PotentialOutliers,
        severity: Severity::Info,
        applies: has_outlier_count,
        check: has_outliers,
        message: outliers_message,
    },
    QualityRule {
        kind: FindingKind::HighVariability,
        severity: Severity::Info,
        applies: has_nonzero_mean,
        check: high_variability,
        message: variability_message,
    },
    QualityRule {
        kind: FindingKind::IdentifierColumn,
        severity: Severity::Info,
        applies: more_than_one_value,
        check: all_unique,
        message: identifier_message,
    },
    QualityRule {
        kind: FindingKind::DominantValue,
        severity: Severity::Info,
        applies: more_than_one_value,
        check: dominant_value,
        message: dominant_message,
    },
];

// ==================== preconditions ====================

fn always(_: &ColumnReport, _: &ProfilerConfig) -> bool {
    true
}

fn has_outlier_count(report: &ColumnReport, _: &ProfilerConfig) -> bool {
    report.kind == Kind::Numeric && report.numeric().and_then(|m| m.outlier_count).is_some()
}

fn has_nonzero_mean(report: &ColumnReport, _: &ProfilerConfig) -> bool {
    report.kind == Kind::Numeric
        && report
            .numeric()
            .and_then(|m| m.mean)
            .is_some_and(|mean| mean != 0.0)
}

fn more_than_one_value(report: &ColumnReport, _: &ProfilerConfig) -> bool {
    report.count > 1
}

// ==================== predicates ====================

fn high_missing(report: &ColumnReport, config: &ProfilerConfig) -> bool {
    report.missing_fraction > config.high_missing_threshold
}

fn moderate_missing(report: &ColumnReport, config: &ProfilerConfig) -> bool {
    report.missing_fraction > config.moderate_missing_threshold
        && report.missing_fraction <= config.high_missing_threshold
}

fn has_outliers(report: &ColumnReport, _: &ProfilerConfig) -> bool {
    report
        .numeric()
        .and_then(|m| m.outlier_count)
        .is_some_and(|count| count > 0)
}

fn high_variability(report: &ColumnReport, config: &ProfilerConfig) -> bool {
    report
        .numeric()
        .and_then(|m| m.coefficient_of_variation())
        .is_some_and(|cv| cv.abs() > config.high_variability_threshold)
}

fn all_unique(report: &ColumnReport, _: &ProfilerConfig) -> bool {
    report.unique_count == report.count
}

fn dominant_value(report: &ColumnReport, config: &ProfilerConfig) -> bool {
    report
        .most_frequent_count()
        .is_some_and(|top| top as f64 / report.count as f64 > config.dominant_value_threshold)
}

// ==================== messages ====================

fn missing_message(report: &ColumnReport, _: &ProfilerConfig) -> String {
    format!(
        "{:.1}% of values in '{}' are missing ({} of {})",
        report.missing_percentage(),
        report.name,
        report.missing_count,
        report.count + report.missing_count
    )
}

fn outliers_message(report: &ColumnReport, config: &ProfilerConfig) -> String {
    let metrics = report.numeric();
    let count = metrics.and_then(|m| m.outlier_count).unwrap_or(0);
    match metrics.and_then(|m| Some((m.q1?, m.q3?, m.iqr?))) {
        Some((q1, q3, iqr)) => {
            let lower = q1 - config.outlier_iqr_multiplier * iqr;
            let upper = q3 + config.outlier_iqr_multiplier * iqr;
            format!(
                "{} potential outlier(s) in '{}' (values outside [{:.2}, {:.2}])",
                count, report.name, lower, upper
            )
        }
        None => format!("{} potential outlier(s) in '{}'", count, report.name),
    }
}

fn variability_message(report: &ColumnReport, _: &ProfilerConfig) -> String {
    let metrics = report.numeric();
    let std_dev = metrics.and_then(|m| m.std_dev).unwrap_or_default();
    let mean = metrics.and_then(|m| m.mean).unwrap_or_default();
    format!(
        "Standard deviation of '{}' ({:.2}) is large relative to its mean ({:.2})",
        report.name, std_dev, mean
    )
}

fn identifier_message(report: &ColumnReport, _: &ProfilerConfig) -> String {
    format!(
        "All {} values in '{}' are unique; it may be an identifier column",
        report.count, report.name
    )
}

fn dominant_message(report: &ColumnReport, _: &ProfilerConfig) -> String {
    let value = report.most_frequent_value().unwrap_or_default();
    let top = report.most_frequent_count().unwrap_or(0);
    format!(
        "Value '{}' accounts for {:.1}% of non-missing values in '{}'",
        value,
        top as f64 / report.count as f64 * 100.0,
        report.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_order() {
        let kinds: Vec<FindingKind> = RULES.iter().map(|rule| rule.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::HighMissing,
                FindingKind::ModerateMissing,
                FindingKind::PotentialOutliers,
                FindingKind::HighVariability,
                FindingKind::IdentifierColumn,
                FindingKind::DominantValue,
            ]
        );
    }

    #[test]
    fn test_only_high_missing_is_a_warning() {
        for rule in &RULES {
            let expected = if rule.kind == FindingKind::HighMissing {
                Severity::Warning
            } else {
                Severity::Info
            };
            assert_eq!(rule.severity, expected, "{:?}", rule.kind);
        }
    }
}
