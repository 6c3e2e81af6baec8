//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate reader calls into the collect and export use-cases.
//! - Keep CLI code decoupled from AppleScript and file layout details.

pub mod collect_service;
pub mod export_service;
