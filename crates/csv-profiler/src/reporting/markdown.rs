use crate::types::{ColumnMetrics, ColumnReport, DatasetReport, NumericMetrics, TextMetrics};
use std::fmt::Write;

/// Render a report as a Markdown document.
///
/// Undefined statistics are shown as `N/A`; numbers use two decimals.
pub fn render_markdown(report: &DatasetReport) -> String {
    let mut out = String::new();

    out.push_str("# CSV Profiling Report\n\n");
    let _ = writeln!(out, "**Generated:** {}\n", report.generated_at);

    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "- **Total Rows:** {}", report.row_count);
    let _ = writeln!(out, "- **Total Columns:** {}", report.column_count);
    let _ = writeln!(out, "- **Findings:** {}", report.findings_count());
    if let Some(timing_ms) = report.timing_ms {
        let _ = writeln!(out, "- **Elapsed:** {:.2} ms", timing_ms);
    }
    out.push('\n');

    out.push_str("## Column Overview\n\n");
    out.push_str("| Column | Type | Missing | Missing % | Unique |\n");
    out.push_str("|--------|------|--------:|----------:|-------:|\n");
    for column in &report.columns {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.1}% | {} |",
            escape_cell(&column.name),
            column.kind.as_str(),
            column.missing_count,
            column.missing_percentage(),
            column.unique_count
        );
    }
    out.push('\n');

    out.push_str("## Detailed Statistics\n\n");
    for column in &report.columns {
        render_column(&mut out, column);
    }

    out
}

fn render_column(out: &mut String, column: &ColumnReport) {
    let _ = writeln!(out, "### {}\n", escape_cell(&column.name));

    if !column.findings.is_empty() {
        out.push_str("**Data Quality Findings:**\n\n");
        for finding in &column.findings {
            let _ = writeln!(
                out,
                "- [{}] {}: {}",
                finding.severity.as_str(),
                finding.kind.display_name(),
                escape_cell(&finding.message)
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "- **Type:** {}", column.kind.as_str());
    let _ = writeln!(out, "- **Non-missing count:** {}", column.count);
    let _ = writeln!(
        out,
        "- **Missing:** {} ({:.1}%)",
        column.missing_count,
        column.missing_percentage()
    );
    let _ = writeln!(out, "- **Unique values:** {}", column.unique_count);

    match &column.metrics {
        ColumnMetrics::Numeric(metrics) => render_numeric(out, metrics),
        ColumnMetrics::Text(metrics) => render_text(out, metrics),
    }
    out.push('\n');
}

fn render_numeric(out: &mut String, metrics: &NumericMetrics) {
    for (label, value) in [
        ("Min", metrics.min),
        ("Max", metrics.max),
        ("Mean", metrics.mean),
        ("Median", metrics.median),
        ("Mode", metrics.mode),
        ("Std Dev", metrics.std_dev),
        ("Q1 (25th percentile)", metrics.q1),
        ("Q3 (75th percentile)", metrics.q3),
        ("IQR", metrics.iqr),
    ] {
        let _ = writeln!(out, "- **{}:** {}", label, format_number(value));
    }
    if let Some(outliers) = metrics.outlier_count {
        let _ = writeln!(out, "- **Outliers:** {}", outliers);
    }
}

fn render_text(out: &mut String, metrics: &TextMetrics) {
    if metrics.top_values.is_empty() {
        out.push_str("- **Top values:** N/A\n");
        return;
    }

    out.push_str("- **Top values:**\n");
    for top in &metrics.top_values {
        let _ = writeln!(
            out,
            "  - `{}`: {} occurrences",
            escape_cell(&top.value),
            top.count
        );
    }
}

/// Two decimals, or `N/A` when undefined.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Escape characters that would break a Markdown table row.
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FindingKind, Kind, QualityFinding, Severity, TopValue};

    fn report_with(columns: Vec<ColumnReport>) -> DatasetReport {
        DatasetReport {
            row_count: 4,
            column_count: columns.len(),
            columns,
            generated_at: "2026-03-14T09:26:53Z".to_string(),
            timing_ms: None,
        }
    }

    fn empty_numeric(name: &str) -> ColumnReport {
        ColumnReport {
            name: name.to_string(),
            kind: Kind::Numeric,
            count: 0,
            missing_count: 4,
            missing_fraction: 1.0,
            unique_count: 0,
            metrics: ColumnMetrics::Numeric(NumericMetrics::default()),
            findings: vec![QualityFinding {
                kind: FindingKind::HighMissing,
                severity: Severity::Warning,
                message: "100.0% of values in 'score' are missing (4 of 4)".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(2.0)), "2.00");
        assert_eq!(format_number(Some(-0.126)), "-0.13");
        assert_eq!(format_number(None), "N/A");
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line\nbreak"), "line break");
    }

    #[test]
    fn test_undefined_metrics_render_as_na() {
        let md = render_markdown(&report_with(vec![empty_numeric("score")]));

        assert!(md.contains("- **Mean:** N/A"));
        assert!(md.contains("- **Median:** N/A"));
        assert!(md.contains("- **IQR:** N/A"));
        assert!(!md.contains("NaN"));
        assert!(!md.contains("**Outliers:**"));
    }

    #[test]
    fn test_findings_prefixed_by_severity() {
        let md = render_markdown(&report_with(vec![empty_numeric("score")]));
        assert!(md.contains("- [warning] High Missing Data: 100.0% of values"));
    }

    #[test]
    fn test_overview_row_and_escaped_name() {
        let column = ColumnReport {
            name: "a|b".to_string(),
            kind: Kind::Text,
            count: 4,
            missing_count: 0,
            missing_fraction: 0.0,
            unique_count: 1,
            metrics: ColumnMetrics::Text(TextMetrics {
                top_values: vec![TopValue {
                    value: "x".to_string(),
                    count: 4,
                }],
            }),
            findings: vec![],
        };
        let md = render_markdown(&report_with(vec![column]));

        assert!(md.contains("| a\\|b | text | 0 | 0.0% | 1 |"));
        assert!(md.contains("  - `x`: 4 occurrences"));
        assert!(md.contains("**Generated:** 2026-03-14T09:26:53Z"));
    }

    #[test]
    fn test_timing_line_only_when_present() {
        let report = report_with(vec![]);
        assert!(!render_markdown(&report).contains("Elapsed"));

        let timed = report.with_timing_ms(3.5);
        assert!(render_markdown(&timed).contains("- **Elapsed:** 3.50 ms"));
    }
}
