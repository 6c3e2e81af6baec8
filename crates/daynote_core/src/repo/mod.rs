//! Read-side access to the Notes application.
//!
//! # Responsibility
//! - Define the `NoteSource` contract the collector scans through.
//! - Isolate AppleScript text and output tokenization from the services.
//!
//! # Invariants
//! - Reader APIs return semantic errors (`Unreadable`, `InvalidCount`) in
//!   addition to bridge transport errors.

pub mod notes_app_repo;
