//! Run configuration.
//!
//! # Responsibility
//! - Hold the knobs of one export run with defaults matching a bare
//!   `daynote` invocation.
//! - Build the Notes reader those knobs describe.
//!
//! # Invariants
//! - `timeout` is at least one second.

use crate::bridge::{OsascriptBridge, DEFAULT_SCRIPT_TIMEOUT};
use crate::repo::notes_app_repo::{AppleNotesReader, BodyFormat};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Report file written when no output path is configured.
pub const DEFAULT_OUTPUT_FILE: &str = "todays_notes.txt";
/// Interpreter used for automation scripts by default.
pub const DEFAULT_OSASCRIPT_PROGRAM: &str = "osascript";

const MIN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    TimeoutTooShort(Duration),
    EmptyOutputPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimeoutTooShort(timeout) => write!(
                f,
                "script timeout must be at least {}s, got {}ms",
                MIN_TIMEOUT.as_secs(),
                timeout.as_millis()
            ),
            Self::EmptyOutputPath => write!(f, "output path cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Report destination, relative paths resolve against the working dir.
    pub output_path: PathBuf,
    /// Bounded wait for each automation script.
    pub timeout: Duration,
    pub osascript_program: PathBuf,
    pub body_format: BodyFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            timeout: DEFAULT_SCRIPT_TIMEOUT,
            osascript_program: PathBuf::from(DEFAULT_OSASCRIPT_PROGRAM),
            body_format: BodyFormat::default(),
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout < MIN_TIMEOUT {
            return Err(ConfigError::TimeoutTooShort(self.timeout));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        Ok(())
    }

    /// Builds the `osascript`-backed reader for this configuration.
    pub fn notes_reader(&self) -> AppleNotesReader<OsascriptBridge> {
        let bridge = OsascriptBridge::new(self.timeout).with_program(&self.osascript_program);
        AppleNotesReader::new(bridge).with_body_format(self.body_format)
    }
}
