//! Domain model for one export run.
//!
//! # Responsibility
//! - Define the note shapes passed between reader, collector and exporter.
//!
//! # Invariants
//! - Records are transient; nothing here is persisted besides the report.

pub mod note;
