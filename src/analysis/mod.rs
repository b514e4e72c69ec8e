//! Archive analysis: unpack a zip, scan it, and ask an external service to
//! summarise the notices found.
//!
//! - [`archive`] — zip extraction into a staging directory.
//! - [`mcp`] — HTTP client for the analysis service.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::scanner::aggregator::scan_directory;

pub mod archive;
pub mod mcp;

/// Something that turns aggregated notice text into an analysis.
pub trait AnalysisClient {
    async fn analyze(&self, copyright_info: &str) -> Result<String>;
}

/// Extract `zip_path` into a temporary directory, scan it and analyze the
/// resulting report. The staging directory is removed on return.
pub async fn analyze_archive<C: AnalysisClient>(zip_path: &Path, client: &C) -> Result<String> {
    let staging = tempfile::Builder::new()
        .prefix("copyright_scanr_")
        .tempdir()
        .context("failed to create temp directory")?;

    archive::extract_zip(zip_path, staging.path())
        .with_context(|| format!("failed to extract archive {}", zip_path.display()))?;

    let report = scan_directory(staging.path()).context("failed to scan extracted archive")?;
    let copyright_info = report.render();
    info!(
        "{}: {} notices, sending for analysis",
        zip_path.display(),
        report.notices.len()
    );

    let analysis = client
        .analyze(&copyright_info)
        .await
        .context("failed to analyze copyright information")?;

    Ok(format_analysis(&copyright_info, &analysis))
}

/// Lay out the raw notices followed by the service's analysis.
pub fn format_analysis(copyright_info: &str, analysis: &str) -> String {
    let mut out = String::new();
    out.push_str("Copyright Analysis Result\n");
    out.push_str("=======================\n\n");
    out.push_str("Original Copyright Information:\n");
    out.push_str("-----------------------------\n");
    out.push_str(copyright_info);
    out.push_str("\n\n");
    out.push_str("AI Analysis:\n");
    out.push_str("-----------\n");
    out.push_str(analysis);
    out
}
