//! Report generation module.
//!
//! A [`DatasetReport`](crate::types::DatasetReport) can be rendered as JSON
//! (undefined statistics become `null`) or as a Markdown document (undefined
//! statistics become `N/A`), and written to disk with [`ReportGenerator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_profiler::reporting::{render_markdown, ReportGenerator};
//!
//! let report = csv_profiler::profile(&table)?;
//! println!("{}", render_markdown(&report));
//!
//! let paths = ReportGenerator::new("outputs", "sales").write_reports(&report)?;
//! ```

mod generator;
mod markdown;

pub use generator::{ReportGenerator, ReportPaths, render_json};
pub use markdown::{escape_cell, format_number, render_markdown};
