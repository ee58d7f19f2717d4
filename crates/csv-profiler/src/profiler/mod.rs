//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling tables, including:
//! - Type inference for columns (numeric vs text)
//! - Per-column statistics
//! - Quality rule evaluation (delegated to [`crate::quality`])
//!
//! Columns are processed independently and nothing is carried between them.

mod statistics;
mod type_inference;

use crate::config::ProfilerConfig;
use crate::error::Result;
use crate::quality::DataQualityAnalyzer;
use crate::types::{Column, ColumnMetrics, ColumnReport, DatasetReport, Kind, Table};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

pub use type_inference::{classify, is_numeric_string, parse_numeric};

/// Data profiler for analyzing table structure and quality.
#[derive(Debug, Clone, Default)]
pub struct DataProfiler {
    config: ProfilerConfig,
}

impl DataProfiler {
    /// Create a profiler with a validated configuration.
    pub fn new(config: ProfilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Profile an entire table, stamping the report with the current time.
    pub fn profile_dataset(&self, table: &Table) -> Result<DatasetReport> {
        self.profile_dataset_at(table, Utc::now())
    }

    /// Profile an entire table with an explicit generation timestamp.
    ///
    /// The table is validated before any column is touched; a structural
    /// violation aborts the whole run.
    pub fn profile_dataset_at(
        &self,
        table: &Table,
        generated_at: DateTime<Utc>,
    ) -> Result<DatasetReport> {
        table.validate()?;

        info!(
            "Profiling {} columns x {} rows",
            table.column_count(),
            table.row_count()
        );

        let mut columns = Vec::with_capacity(table.column_count());
        for (name, values) in table.columns() {
            let column = Column::new(name, values);
            let report = self.profile_column(&column);
            debug!(
                column = %report.name,
                kind = report.kind.as_str(),
                findings = report.findings.len(),
                "Profiled column"
            );
            columns.push(report);
        }

        Ok(DatasetReport {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            timing_ms: None,
        })
    }

    /// Statistics plus findings for one classified column.
    pub fn profile_column(&self, column: &Column<'_>) -> ColumnReport {
        let mut report = self.summarize(column);
        report.findings = DataQualityAnalyzer::evaluate(&report, &self.config);
        report
    }

    /// Compute the metric block for one column. Findings are left empty.
    pub fn summarize(&self, column: &Column<'_>) -> ColumnReport {
        let row_count = column.values.len();

        let (count, unique_count, metrics) = match column.kind {
            Kind::Numeric => {
                let mut parsed: Vec<f64> = column
                    .present_values()
                    .filter_map(parse_numeric)
                    .collect();
                parsed.sort_by(f64::total_cmp);

                let metrics =
                    statistics::summarize_sorted(&parsed, self.config.outlier_iqr_multiplier);
                (
                    parsed.len(),
                    statistics::distinct_count_sorted(&parsed),
                    ColumnMetrics::Numeric(metrics),
                )
            }
            Kind::Text => {
                let count = column.present_values().count();
                let (metrics, unique_count) =
                    statistics::summarize_text(column.present_values(), self.config.top_k);
                (count, unique_count, ColumnMetrics::Text(metrics))
            }
        };

        let missing_count = row_count - count;
        let missing_fraction = if row_count == 0 {
            0.0
        } else {
            missing_count as f64 / row_count as f64
        };

        ColumnReport {
            name: column.name.to_string(),
            kind: column.kind,
            count,
            missing_count,
            missing_fraction,
            unique_count,
            metrics,
            findings: Vec::new(),
        }
    }
}

/// Profile a table with the default configuration.
pub fn profile(table: &Table) -> Result<DatasetReport> {
    DataProfiler::default().profile_dataset(table)
}
