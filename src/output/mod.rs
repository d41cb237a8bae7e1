//! Output formatting and display for pdfdesk.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - The reconciliation report, as text or JSON
//! - Load, merge and write summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfdesk::output::OutputFormatter;
//! use pdfdesk::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Scanning folder");
//! formatter.success("Join completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use serde::Serialize;

use crate::error::{PdfDeskError, Result};
use crate::io::{LoadStatistics, WriteStatistics};
use crate::merge::MergeStatistics;
use crate::reconcile::{ReconciliationReport, SelectionIssue};
use crate::session::JoinEntry;

/// Reconciliation report as written by `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportJson<'a, H> {
    found: usize,
    mergeable: bool,
    #[serde(flatten)]
    report: &'a ReconciliationReport<H>,
    issues: Vec<SelectionIssue>,
}

/// Render a reconciliation report as pretty-printed JSON.
///
/// # Errors
///
/// Fails only if a handle cannot be serialized.
pub fn report_to_json<H: Serialize>(report: &ReconciliationReport<H>) -> Result<String> {
    let json = ReportJson {
        found: report.found(),
        mergeable: report.is_mergeable(),
        report,
        issues: report.issues(),
    };

    serde_json::to_string_pretty(&json)
        .map_err(|e| PdfDeskError::other(format!("Failed to serialize report: {e}")))
}

/// Display a reconciliation report: the matched files, one line per
/// problem, and the found count.
pub fn display_report<H>(formatter: &OutputFormatter, report: &ReconciliationReport<H>) {
    if report.found() > 0 {
        formatter.section("Selected PDFs:");
        for (idx, name) in report.matched_names().into_iter().enumerate() {
            formatter.list_item(idx + 1, name);
        }
    }

    for issue in report.issues() {
        formatter.warning(&issue.to_string());
    }

    formatter.info(&format!("Found: {}", report.found()));
}

/// Display the join list.
pub fn display_join_list<S>(formatter: &OutputFormatter, entries: &[JoinEntry<S>]) {
    for (idx, entry) in entries.iter().enumerate() {
        formatter.list_item(idx + 1, &entry.describe());
    }
}

/// Display load statistics to the user.
pub fn display_load_statistics(formatter: &OutputFormatter, stats: &LoadStatistics) {
    if stats.failure_count > 0 {
        formatter.warning(&format!(
            "{} file(s) failed to load",
            stats.failure_count
        ));
    }

    formatter.debug(&format!(
        "Loaded {} file(s) in {:.2}s: {} pages, {}",
        stats.success_count,
        stats.total_time.as_secs_f64(),
        stats.total_pages,
        stats.format_total_size()
    ));
}

/// Display merge statistics (verbose only).
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.detail("Files joined", &stats.files_merged.to_string());
    formatter.detail("Total pages", &stats.total_pages.to_string());
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
}

/// Display write statistics (verbose only).
pub fn display_write_statistics(formatter: &OutputFormatter, stats: &WriteStatistics) {
    formatter.detail("Output", &stats.output_path.display().to_string());
    formatter.detail("Output size", &stats.format_file_size());
    formatter.detail(
        "Write time",
        &format!("{:.2}s", stats.write_time.as_secs_f64()),
    );
}
