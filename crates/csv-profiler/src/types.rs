use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ProfilerError, Result};

// ============================================================================
// Input Types
// ============================================================================

/// A single raw cell: either a recorded string or an explicit missing marker.
///
/// An empty string that the source actually recorded is `Present("")`; only
/// the ingestion layer decides whether such cells collapse to `Missing`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Present(String),
    Missing,
}

impl Cell {
    /// Create a present cell.
    pub fn present(value: impl Into<String>) -> Self {
        Self::Present(value.into())
    }

    /// The raw string, if the cell is present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Cell::from)
    }
}

/// An in-memory table: ordered column names, per-column cells, and a row count.
///
/// Names and cells are stored side by side, so every listed column has cells.
/// Construction does not enforce equal column lengths or unique names;
/// [`Table::validate`] does, and profiling always validates before touching
/// any column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    cells: Vec<Vec<Cell>>,
    row_count: usize,
}

impl Table {
    /// Create an empty table that declares `row_count` rows.
    pub fn new(row_count: usize) -> Self {
        Self {
            names: Vec::new(),
            cells: Vec::new(),
            row_count,
        }
    }

    /// Append a column (builder style).
    pub fn with_column(mut self, name: impl Into<String>, cells: Vec<Cell>) -> Self {
        self.push_column(name, cells);
        self
    }

    /// Append a column. A repeated name is recorded so that validation can
    /// reject it.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<Cell>) {
        self.names.push(name.into());
        self.cells.push(cells);
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Columns in order, as `(name, cells)` pairs.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Cells of the first column with this name, in row order.
    pub fn values(&self, name: &str) -> Option<&[Cell]> {
        self.columns()
            .find(|(column, _)| *column == name)
            .map(|(_, cells)| cells)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Check the structural invariants: unique names and every column has
    /// exactly `row_count` cells.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.names.len());
        for (name, cells) in self.columns() {
            if !seen.insert(name) {
                return Err(ProfilerError::DuplicateColumn(name.to_string()));
            }

            if cells.len() != self.row_count {
                return Err(ProfilerError::InvalidTable {
                    column: name.to_string(),
                    expected: self.row_count,
                    actual: cells.len(),
                });
            }
        }
        Ok(())
    }
}

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Numeric,
    Text,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

/// A classified column borrowed from a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub values: &'a [Cell],
    pub kind: Kind,
}

impl<'a> Column<'a> {
    /// Classify `values` and wrap them as a column.
    pub fn new(name: &'a str, values: &'a [Cell]) -> Self {
        Self {
            name,
            values,
            kind: crate::profiler::classify(values),
        }
    }

    /// Iterator over the present (non-missing) raw values.
    pub fn present_values(self) -> impl Iterator<Item = &'a str> {
        self.values.iter().filter_map(Cell::as_str)
    }
}

// ============================================================================
// Report Types
// ============================================================================

/// Metrics computed for numeric columns. Every field is `None` when the
/// column has no non-missing values; `std_dev` and `iqr` are also `None` when
/// the spread is too wide to represent as an `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericMetrics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Most frequent value; ties resolve to the smallest value.
    pub mode: Option<f64>,
    /// Frequency of `mode`.
    pub mode_count: Option<usize>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub iqr: Option<f64>,
    /// Values outside the IQR fences. Only computed with at least 4 values.
    pub outlier_count: Option<usize>,
}

impl NumericMetrics {
    /// Standard deviation divided by the mean.
    ///
    /// `None` when either is undefined or the mean is zero.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        match (self.std_dev, self.mean) {
            (Some(std_dev), Some(mean)) if mean != 0.0 => Some(std_dev / mean),
            _ => None,
        }
    }
}

/// A frequent value of a text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

/// Metrics computed for text columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Most frequent values, descending by count, ties in first-seen order.
    pub top_values: Vec<TopValue>,
}

/// Kind-specific metrics block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMetrics {
    Numeric(NumericMetrics),
    Text(TextMetrics),
}

/// Severity of a quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// The quality rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    HighMissing,
    ModerateMissing,
    PotentialOutliers,
    HighVariability,
    IdentifierColumn,
    DominantValue,
}

impl FindingKind {
    /// Get a human-readable display name for the finding kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HighMissing => "High Missing Data",
            Self::ModerateMissing => "Moderate Missing Data",
            Self::PotentialOutliers => "Potential Outliers",
            Self::HighVariability => "High Variability",
            Self::IdentifierColumn => "Identifier Column",
            Self::DominantValue => "Dominant Value",
        }
    }
}

/// A quality observation attached to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFinding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
}

/// Statistics and findings for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    pub kind: Kind,
    /// Number of non-missing values.
    pub count: usize,
    pub missing_count: usize,
    /// `missing_count / row_count`, 0 for an empty table.
    pub missing_fraction: f64,
    pub unique_count: usize,
    pub metrics: ColumnMetrics,
    pub findings: Vec<QualityFinding>,
}

impl ColumnReport {
    pub fn numeric(&self) -> Option<&NumericMetrics> {
        match &self.metrics {
            ColumnMetrics::Numeric(metrics) => Some(metrics),
            ColumnMetrics::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&TextMetrics> {
        match &self.metrics {
            ColumnMetrics::Text(metrics) => Some(metrics),
            ColumnMetrics::Numeric(_) => None,
        }
    }

    /// Missing share as a percentage (0-100).
    pub fn missing_percentage(&self) -> f64 {
        self.missing_fraction * 100.0
    }

    /// Frequency of the most common non-missing value.
    pub fn most_frequent_count(&self) -> Option<usize> {
        match &self.metrics {
            ColumnMetrics::Numeric(metrics) => metrics.mode_count,
            ColumnMetrics::Text(metrics) => metrics.top_values.first().map(|top| top.count),
        }
    }

    /// Display form of the most common non-missing value.
    pub fn most_frequent_value(&self) -> Option<String> {
        match &self.metrics {
            ColumnMetrics::Numeric(metrics) => metrics.mode.map(|mode| mode.to_string()),
            ColumnMetrics::Text(metrics) => {
                metrics.top_values.first().map(|top| top.value.clone())
            }
        }
    }

    pub fn has_finding(&self, kind: FindingKind) -> bool {
        self.findings.iter().any(|finding| finding.kind == kind)
    }
}

/// The output of one profiling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnReport>,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    /// Wall-clock time of the run, stamped by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_ms: Option<f64>,
}

impl DatasetReport {
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Total number of findings across all columns.
    pub fn findings_count(&self) -> usize {
        self.columns.iter().map(|column| column.findings.len()).sum()
    }

    /// Number of findings with the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.columns
            .iter()
            .flat_map(|column| &column.findings)
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Record the elapsed time, rounded to two decimals.
    pub fn with_timing_ms(mut self, elapsed_ms: f64) -> Self {
        self.timing_ms = Some((elapsed_ms * 100.0).round() / 100.0);
        self
    }
}

static_assertions::assert_impl_all!(Table: Send, Sync);
static_assertions::assert_impl_all!(DatasetReport: Send, Sync);
