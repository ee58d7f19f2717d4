//! CSV ingestion.
//!
//! Every column is read as a string column so that classification sees the
//! raw cell text; polars' own schema inference is never consulted.

use crate::config::ProfilerConfig;
use crate::error::{Result, ResultExt};
use crate::types::{Cell, Table};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Read a CSV file with a header row into a [`Table`].
pub fn read_csv_table(path: impl AsRef<Path>, config: &ProfilerConfig) -> Result<Table> {
    let path = path.as_ref();
    std::fs::metadata(path).context(format!("Cannot open input file {}", path.display()))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Failed to open {}", path.display()))?
        .finish()
        .context(format!("Failed to parse {}", path.display()))?;

    info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    table_from_dataframe(&df, config)
}

/// Convert an in-memory frame into a [`Table`], applying the configured
/// missing markers. Non-string columns are cast to strings first.
pub fn table_from_dataframe(df: &DataFrame, config: &ProfilerConfig) -> Result<Table> {
    let mut table = Table::new(df.height());

    for column in df.get_columns() {
        let name = column.name().to_string();
        let series = column.as_materialized_series().cast(&DataType::String)?;
        let strings = series.str()?;

        let cells: Vec<Cell> = strings
            .into_iter()
            .map(|value| match value {
                Some(raw) if !config.is_missing_marker(raw) => Cell::present(raw),
                _ => Cell::Missing,
            })
            .collect();

        debug!(
            column = %name,
            missing = cells.iter().filter(|cell| cell.is_missing()).count(),
            "Ingested column"
        );
        table.push_column(name, cells);
    }

    Ok(table)
}
