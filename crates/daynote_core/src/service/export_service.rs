//! Report export use-case.
//!
//! # Responsibility
//! - Render collected notes into the fixed plain-text report layout.
//! - Write the report, replacing any previous file.
//! - Drive one complete run: count, scan, export.
//!
//! # Invariants
//! - An empty selection still produces a report (the placeholder line).
//! - Rendering is deterministic: the same notes give the same bytes.
//! - A failed count is treated as zero notes.
//! - Only the final write can fail a run.

use crate::config::ExportConfig;
use crate::model::note::NoteRecord;
use crate::repo::notes_app_repo::NoteSource;
use crate::service::collect_service::{collect_todays, ScanSummary};
use crate::timestamp::format_timestamp;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Report content when nothing was modified today.
pub const EMPTY_REPORT: &str = "No notes found from today\n";

const BLOCK_TERMINATOR: &str = "\n\n\n";

pub type ExportResult<T> = Result<T, ExportError>;

/// Failure to persist the report.
#[derive(Debug)]
pub enum ExportError {
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write { path, source } => {
                write!(f, "failed to write report `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// Progress milestones of one run, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    /// The note count is known (zero when the count query failed).
    Counted { total: usize },
    /// A note modified today was found during the scan.
    Matched { note: &'a NoteRecord },
    /// The report is about to be written.
    Exporting { notes: usize, path: &'a Path },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub report_path: PathBuf,
    pub summary: ScanSummary,
}

impl ExportOutcome {
    pub fn exported(&self) -> usize {
        self.summary.matched
    }
}

/// Renders the report text for `notes` in the given order.
pub fn render_report(notes: &[NoteRecord]) -> String {
    if notes.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let mut report = String::new();
    for (position, note) in notes.iter().enumerate() {
        report.push_str(&format!("=== Note {} ===\n", position + 1));
        report.push_str(&format!("Modified: {}\n", format_timestamp(&note.modified_at)));
        report.push_str(&format!("Title: {}\n", note.title));
        report.push_str("---\n");
        report.push_str(&note.body);
        report.push_str(BLOCK_TERMINATOR);
    }
    report
}

/// Writes the rendered report to `path`, truncating any existing file.
pub fn export_notes(notes: &[NoteRecord], path: &Path) -> ExportResult<()> {
    let report = render_report(notes);
    std::fs::write(path, report.as_bytes()).map_err(|source| {
        error!(
            "event=report_write module=export status=error path={} error={}",
            path.display(),
            source
        );
        ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "event=report_write module=export status=ok path={} notes={} bytes={}",
        path.display(),
        notes.len(),
        report.len()
    );
    Ok(())
}

/// Runs one export: count notes, collect today's, write the report.
pub fn run_export<S, F>(
    config: &ExportConfig,
    source: &S,
    today: NaiveDate,
    mut on_progress: F,
) -> ExportResult<ExportOutcome>
where
    S: NoteSource + ?Sized,
    F: FnMut(ProgressEvent<'_>),
{
    let total = match source.count_notes() {
        Ok(total) => total,
        Err(err) => {
            warn!(
                "event=note_count module=export status=error fallback=0 error={}",
                err
            );
            0
        }
    };
    on_progress(ProgressEvent::Counted { total });

    let collection = collect_todays(source, total, today, |note| {
        on_progress(ProgressEvent::Matched { note });
    });

    on_progress(ProgressEvent::Exporting {
        notes: collection.notes.len(),
        path: &config.output_path,
    });
    export_notes(&collection.notes, &config.output_path)?;

    Ok(ExportOutcome {
        report_path: config.output_path.clone(),
        summary: collection.summary,
    })
}
