//! Core logic for daynote.
//! Reads today's notes from the Notes application and writes the daily report.

pub mod bridge;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timestamp;

pub use bridge::{AutomationBridge, BridgeError, BridgeResult, OsascriptBridge};
pub use config::{ConfigError, ExportConfig, DEFAULT_OUTPUT_FILE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NoteRecord, RawNote};
pub use repo::notes_app_repo::{AppleNotesReader, BodyFormat, NoteSource, ReadError, ReadResult};
pub use service::collect_service::{collect_todays, Collection, ScanSummary};
pub use service::export_service::{
    export_notes, render_report, run_export, ExportError, ExportOutcome, ExportResult,
    ProgressEvent, EMPTY_REPORT,
};
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
