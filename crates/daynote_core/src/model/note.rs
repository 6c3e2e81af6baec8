//! Note records read from the Notes application.
//!
//! # Responsibility
//! - Carry raw fetch results from the reader to the collector.
//! - Carry parsed, selected notes from the collector to the exporter.
//!
//! # Invariants
//! - `title` and the raw timestamp are trimmed; `body` is passed through
//!   untouched.

use chrono::NaiveDateTime;

/// Unparsed result of fetching one note by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNote {
    /// 1-based position in the application's note list at fetch time.
    pub index: usize,
    pub title: String,
    /// Modification timestamp as rendered by the automation script.
    pub raw_modified_at: String,
    /// Empty when the body fetch failed.
    pub body: String,
}

/// A note selected for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub title: String,
    pub body: String,
    /// Naive local time, second precision.
    pub modified_at: NaiveDateTime,
}

impl NoteRecord {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        modified_at: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            modified_at,
        }
    }
}
