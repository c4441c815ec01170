//! Plain-text run summary, rewritten on every pipeline run.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use playsmart_transform::BatchSummary;

use crate::error::StoreError;
use crate::naming::{is_processed_file, is_raw_file, list_files};

pub const SUMMARY_FILE_NAME: &str = "pipeline_summary.txt";

/// Number of stores listed in the report.
const TOP_STORES: usize = 10;

/// Where and when a run happened; rendered into the report header.
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    pub executed_at: DateTime<Utc>,
    pub raw_dir: &'a Path,
    pub processed_dir: &'a Path,
    /// Per-run log file, when file logging is enabled.
    pub log_file: Option<&'a Path>,
}

/// Renders the summary text. File counts are passed in so rendering stays
/// free of I/O.
#[must_use]
pub fn render_summary_report(
    ctx: &SummaryContext<'_>,
    summary: &BatchSummary,
    raw_files: usize,
    processed_files: usize,
) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "PlaySmart Pipeline Execution Summary");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Execution Time: {}",
        ctx.executed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Raw Data Directory: {}", ctx.raw_dir.display());
    let _ = writeln!(out, "Processed Data Directory: {}", ctx.processed_dir.display());

    let _ = writeln!(out);
    let _ = writeln!(out, "Deals Summary:");
    let _ = writeln!(out, "  Total Deals: {}", summary.total_deals);
    if let Some(mean) = summary.mean_discount_pct {
        let _ = writeln!(out, "  Average Discount: {mean:.2}%");
    }
    if let Some(max) = summary.max_discount_pct {
        let _ = writeln!(out, "  Max Discount: {max:.2}%");
    }

    if !summary.by_quality.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Deal Quality Breakdown:");
        for (quality, count) in &summary.by_quality {
            let _ = writeln!(out, "    {quality}: {count}");
        }
    }

    if !summary.by_store.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Deals by Store (top {TOP_STORES}):");
        for (store, count) in summary.by_store.iter().take(TOP_STORES) {
            let _ = writeln!(out, "    {store}: {count}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Data Files:");
    let _ = writeln!(out, "  Raw Data Files: {raw_files}");
    let _ = writeln!(out, "  Processed Data Files: {processed_files}");
    if let Some(log_file) = ctx.log_file {
        let _ = writeln!(out, "  Log File: {}", log_file.display());
    }

    out
}

/// Counts the run artifacts on disk and (re)writes
/// `<processed_dir>/pipeline_summary.txt`.
///
/// # Errors
///
/// [`StoreError::Io`] if either directory cannot be listed or the report
/// cannot be written.
pub fn write_summary_report(
    ctx: &SummaryContext<'_>,
    summary: &BatchSummary,
) -> Result<PathBuf, StoreError> {
    let raw_files = list_files(ctx.raw_dir, is_raw_file)?.len();
    let processed_files = list_files(ctx.processed_dir, is_processed_file)?.len();
    let text = render_summary_report(ctx, summary, raw_files, processed_files);

    fs::create_dir_all(ctx.processed_dir).map_err(|e| StoreError::io(ctx.processed_dir, e))?;
    let path = ctx.processed_dir.join(SUMMARY_FILE_NAME);
    fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;

    tracing::info!(path = %path.display(), "wrote run summary");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use playsmart_core::DealQuality;
    use rust_decimal::Decimal;

    use super::*;

    fn ctx() -> SummaryContext<'static> {
        SummaryContext {
            executed_at: Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
            raw_dir: Path::new("data_raw"),
            processed_dir: Path::new("data_processed"),
            log_file: None,
        }
    }

    fn summary() -> BatchSummary {
        BatchSummary {
            total_deals: 3,
            mean_discount_pct: Some(Decimal::new(5333, 2)),
            max_discount_pct: Some(Decimal::new(80, 0)),
            by_quality: vec![(DealQuality::Exceptional, 2), (DealQuality::Minimal, 1)],
            by_store: (0..12).map(|i| (format!("Store {i}"), 12 - i)).collect(),
        }
    }

    #[test]
    fn report_lists_headline_figures() {
        let text = render_summary_report(&ctx(), &summary(), 4, 2);
        assert!(text.starts_with("PlaySmart Pipeline Execution Summary\n"));
        assert!(text.contains("Execution Time: 2024-03-09 07:05:01 UTC"));
        assert!(text.contains("  Total Deals: 3\n"));
        assert!(text.contains("  Average Discount: 53.33%\n"));
        assert!(text.contains("  Max Discount: 80.00%\n"));
        assert!(text.contains("    Exceptional: 2\n"));
        assert!(text.contains("    Minimal: 1\n"));
        assert!(text.contains("  Raw Data Files: 4\n"));
        assert!(text.contains("  Processed Data Files: 2\n"));
        assert!(!text.contains("Log File"));
    }

    #[test]
    fn report_caps_store_list() {
        let text = render_summary_report(&ctx(), &summary(), 0, 0);
        assert!(text.contains("    Store 9: 3\n"));
        assert!(!text.contains("Store 10:"));
        assert!(!text.contains("Store 11:"));
    }

    #[test]
    fn report_for_empty_batch_omits_discounts() {
        let empty = BatchSummary {
            total_deals: 0,
            mean_discount_pct: None,
            max_discount_pct: None,
            by_quality: Vec::new(),
            by_store: Vec::new(),
        };
        let text = render_summary_report(&ctx(), &empty, 0, 0);
        assert!(text.contains("  Total Deals: 0\n"));
        assert!(!text.contains("Average Discount"));
        assert!(!text.contains("Deal Quality Breakdown"));
    }

    #[test]
    fn report_mentions_log_file_when_set() {
        let mut c = ctx();
        c.log_file = Some(Path::new("logs/pipeline_20240309_070501.log"));
        let text = render_summary_report(&c, &summary(), 0, 0);
        assert!(text.contains("  Log File: logs/pipeline_20240309_070501.log\n"));
    }
}
