//! CSV Column Profiling Library
//!
//! Computes per-column descriptive statistics for tabular data and flags
//! data quality concerns, built with Rust and Polars.
//!
//! # Overview
//!
//! - **Type Classification**: a column is numeric only when every non-missing
//!   value parses as a number
//! - **Column Statistics**: counts, missing share, distinct values, and either
//!   numeric summaries (quartiles, mode, standard deviation) or the most
//!   frequent text values
//! - **Quality Findings**: a fixed, ordered set of rules over the computed
//!   metrics (missing data, outliers, variability, identifiers, dominance)
//! - **Reporting**: JSON and Markdown renderings of the result
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use csv_profiler::{io::read_csv_table, profile, ProfilerConfig};
//! use csv_profiler::reporting::render_markdown;
//!
//! let table = read_csv_table("data.csv", &ProfilerConfig::default())?;
//! let report = profile(&table)?;
//!
//! for column in &report.columns {
//!     println!("{}: {} findings", column.name, column.findings.len());
//! }
//! println!("{}", render_markdown(&report));
//! ```
//!
//! # Configuration
//!
//! Use [`ProfilerConfig`] with [`DataProfiler`] to tune the rule thresholds:
//!
//! ```rust,ignore
//! use csv_profiler::{DataProfiler, ProfilerConfig};
//!
//! let config = ProfilerConfig::builder()
//!     .high_missing_threshold(0.7)
//!     .outlier_iqr_multiplier(3.0)
//!     .top_k(10)
//!     .build()?;
//!
//! let report = DataProfiler::new(config)?.profile_dataset(&table)?;
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder};
pub use error::{ProfilerError, Result as ProfilerResult, ResultExt};
pub use io::{read_csv_table, table_from_dataframe};
pub use profiler::{DataProfiler, classify, is_numeric_string, parse_numeric, profile};
pub use quality::{DataQualityAnalyzer, RuleOutcome};
pub use reporting::{ReportGenerator, ReportPaths, render_json, render_markdown};
pub use types::{
    Cell, Column, ColumnMetrics, ColumnReport, DatasetReport, FindingKind, Kind, NumericMetrics,
    QualityFinding, Severity, Table, TextMetrics, TopValue,
};
