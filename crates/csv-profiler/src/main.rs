//! CLI entry point for the CSV profiler.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use csv_profiler::{
    DataProfiler, DatasetReport, ProfilerConfig, ReportGenerator, ReportPaths, Severity,
    read_csv_table, render_json,
};
use std::path::Path;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Profile the columns of a CSV file",
    long_about = "Computes per-column statistics for a CSV file and flags data quality \
                  concerns.\n\n\
                  EXAMPLES:\n  \
                  # Write outputs/report.json and outputs/report.md\n  \
                  csv-profiler data.csv\n\n  \
                  # Custom output location and name\n  \
                  csv-profiler data.csv -o results/ -n sales\n\n  \
                  # Print the JSON report only\n  \
                  csv-profiler data.csv --json | jq '.columns[].findings'"
)]
struct Args {
    /// Path to the CSV file to profile
    input: String,

    /// Output directory for the JSON and Markdown reports
    #[arg(short, long, default_value = "outputs")]
    out_dir: String,

    /// Base name of the report files (without extension)
    #[arg(short, long, default_value = "report")]
    name: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors)
    #[arg(short, long)]
    quiet: bool,

    /// Print the JSON report to stdout instead of writing files
    ///
    /// Disables all logs so stdout carries only JSON.
    #[arg(long)]
    json: bool,

    /// Missing share above which a column gets a warning (0.0 - 1.0)
    #[arg(long, default_value = "0.5")]
    high_missing: f64,

    /// Missing share above which a column gets a note (0.0 - 1.0)
    #[arg(long, default_value = "0.2")]
    moderate_missing: f64,

    /// IQR multiplier for outlier fences
    #[arg(long, default_value = "1.5")]
    outlier_multiplier: f64,

    /// Number of most frequent values listed for text columns
    #[arg(long, default_value = "5")]
    top_k: usize,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = ProfilerConfig::builder()
        .high_missing_threshold(args.high_missing)
        .moderate_missing_threshold(args.moderate_missing)
        .outlier_iqr_multiplier(args.outlier_multiplier)
        .top_k(args.top_k)
        .build()
        .context("Invalid threshold options")?;

    let started = Instant::now();
    info!("Loading dataset from: {}", args.input);
    let table = read_csv_table(&args.input, &config)?;
    let report = DataProfiler::new(config)?.profile_dataset(&table)?;
    let report = report.with_timing_ms(started.elapsed().as_secs_f64() * 1000.0);

    if args.json {
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    let paths = ReportGenerator::new(&args.out_dir, &args.name).write_reports(&report)?;

    if !args.quiet {
        print_summary(&args.input, &report, &paths);
    }

    Ok(())
}

/// Print a short human-readable summary.
///
/// Uses `println!` rather than logging since this is the primary output.
fn print_summary(input: &str, report: &DatasetReport, paths: &ReportPaths) {
    println!();
    println!("{}", "=".repeat(60));
    println!("PROFILING COMPLETE");
    println!("{}", "=".repeat(60));
    println!(
        "Input:    {} ({} rows x {} columns)",
        input, report.row_count, report.column_count
    );
    println!(
        "Findings: {} ({} warning, {} info)",
        report.findings_count(),
        report.count_by_severity(Severity::Warning),
        report.count_by_severity(Severity::Info)
    );
    println!("JSON:     {}", paths.json.display());
    println!("Markdown: {}", paths.markdown.display());
    if let Some(timing_ms) = report.timing_ms {
        println!("Elapsed:  {:.2} ms", timing_ms);
    }
    println!("{}", "=".repeat(60));
}
