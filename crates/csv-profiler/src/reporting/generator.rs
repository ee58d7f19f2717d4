use crate::error::{Result, ResultExt};
use crate::reporting::markdown::render_markdown;
use crate::types::DatasetReport;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &DatasetReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Paths of the files written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Writes JSON and Markdown renderings of a report to an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: String,
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_name: output_name.into(),
        }
    }

    /// Write `<name>.json` and `<name>.md`, creating the directory if needed.
    pub fn write_reports(&self, report: &DatasetReport) -> Result<ReportPaths> {
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory {}",
            self.output_dir.display()
        ))?;

        let json = self.output_dir.join(format!("{}.json", self.output_name));
        write_file(&json, &render_json(report)?)?;
        info!("JSON report saved: {}", json.display());

        let markdown = self.output_dir.join(format!("{}.md", self.output_name));
        write_file(&markdown, &render_markdown(report))?;
        info!("Markdown report saved: {}", markdown.display());

        Ok(ReportPaths { json, markdown })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path).context(format!("Failed to create {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .context(format!("Failed to write {}", path.display()))?;
    Ok(())
}
