//! Today's-notes collection use-case.
//!
//! # Responsibility
//! - Scan notes `1..=total` one at a time through a `NoteSource`.
//! - Keep notes whose modification date equals the supplied `today`.
//! - Order the selection oldest first.
//!
//! # Invariants
//! - Every returned record satisfies `modified_at.date() == today`.
//! - Ordering is non-decreasing by `modified_at`; equal timestamps keep
//!   scan order.
//! - A note that cannot be fetched or parsed is skipped, never fatal.

use crate::model::note::NoteRecord;
use crate::repo::notes_app_repo::{NoteSource, ReadError};
use crate::timestamp::parse_timestamp;
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Counters describing one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Indices scanned.
    pub total: usize,
    /// Notes kept for export.
    pub matched: usize,
    /// Notes read fine but modified on another day.
    pub other_day: usize,
    /// Notes skipped because the fetch failed or the output did not split.
    pub unreadable: usize,
    /// Notes skipped because the timestamp did not parse.
    pub unparseable: usize,
}

/// Result of a scan: sorted notes plus counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub notes: Vec<NoteRecord>,
    pub summary: ScanSummary,
}

/// Collects notes modified on `today`, sorted oldest first.
///
/// `on_match` is called as soon as each matching note is read, before the
/// scan finishes, so callers can report progress on slow automation calls.
pub fn collect_todays<S, F>(
    source: &S,
    total: usize,
    today: NaiveDate,
    mut on_match: F,
) -> Collection
where
    S: NoteSource + ?Sized,
    F: FnMut(&NoteRecord),
{
    let mut notes = Vec::new();
    let mut summary = ScanSummary {
        total,
        ..ScanSummary::default()
    };

    info!(
        "event=scan_start module=collect status=ok total={} today={}",
        total, today
    );

    for index in 1..=total {
        let raw = match source.fetch_note(index) {
            Ok(raw) => raw,
            Err(err) => {
                summary.unreadable += 1;
                log_skipped_note(index, &err);
                continue;
            }
        };

        let modified_at = match parse_timestamp(&raw.raw_modified_at) {
            Ok(modified_at) => modified_at,
            Err(err) => {
                summary.unparseable += 1;
                warn!(
                    "event=note_skipped module=collect status=error index={} reason=unparseable_date raw={:?} error={}",
                    index, raw.raw_modified_at, err
                );
                continue;
            }
        };

        if modified_at.date() != today {
            summary.other_day += 1;
            debug!(
                "event=note_other_day module=collect status=ok index={} modified_at={}",
                index, modified_at
            );
            continue;
        }

        let record = NoteRecord::new(raw.title, raw.body, modified_at);
        on_match(&record);
        notes.push(record);
    }

    // `sort_by_key` is stable, so equal timestamps keep scan order.
    notes.sort_by_key(|note| note.modified_at);
    summary.matched = notes.len();

    info!(
        "event=scan_done module=collect status=ok total={} matched={} other_day={} unreadable={} unparseable={}",
        summary.total, summary.matched, summary.other_day, summary.unreadable, summary.unparseable
    );

    Collection { notes, summary }
}

fn log_skipped_note(index: usize, err: &ReadError) {
    let reason = match err {
        ReadError::Unreadable { .. } => "unreadable",
        ReadError::Bridge(_) => "fetch_failed",
        ReadError::InvalidIndex(_) | ReadError::InvalidCount(_) => "invalid",
    };
    warn!(
        "event=note_skipped module=collect status=error index={} reason={} error={}",
        index, reason, err
    );
}
