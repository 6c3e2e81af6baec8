//! CLI argument parsing using clap.
//!
//! Every flag is optional; a bare `daynote` exports to `todays_notes.txt`
//! in the working directory.

use clap::{Parser, ValueEnum};
use daynote_core::{BodyFormat, ExportConfig, DEFAULT_OUTPUT_FILE};
use std::path::PathBuf;
use std::time::Duration;

/// Export notes modified today from Notes.app into a plain-text report.
#[derive(Parser, Debug, Clone)]
#[command(name = "daynote")]
#[command(version = daynote_core::core_version(), about, long_about = None)]
pub struct Args {
    /// Report file to write (overwritten on every run)
    #[arg(short, long, env = "DAYNOTE_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Seconds to wait for each Notes automation call
    #[arg(long, env = "DAYNOTE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Which Notes property to export as the note body
    #[arg(long, env = "DAYNOTE_BODY_FORMAT", value_enum, default_value_t = BodyFormatArg::Html)]
    pub body_format: BodyFormatArg,

    /// Interpreter used to run AppleScript
    #[arg(long, env = "DAYNOTE_OSASCRIPT", default_value = "osascript")]
    pub osascript: PathBuf,

    /// Log level: trace, debug, info, warn, error or off
    ///
    /// Defaults to `warn` on stderr, or the build default when logging to files.
    #[arg(long, env = "DAYNOTE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Write rolling log files to this directory
    #[arg(long, env = "DAYNOTE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormatArg {
    /// Stored HTML (`body` property)
    Html,
    /// Text rendered by Notes (`plaintext` property)
    Plaintext,
}

impl From<BodyFormatArg> for BodyFormat {
    fn from(value: BodyFormatArg) -> Self {
        match value {
            BodyFormatArg::Html => Self::Html,
            BodyFormatArg::Plaintext => Self::Plaintext,
        }
    }
}

impl Args {
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            output_path: self.output.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            osascript_program: self.osascript.clone(),
            body_format: self.body_format.into(),
        }
    }

    /// Resolves the log level for the selected destination.
    pub fn effective_log_level(&self) -> String {
        match (&self.log_level, &self.log_dir) {
            (Some(level), _) => level.clone(),
            (None, Some(_)) => daynote_core::default_log_level().to_string(),
            (None, None) => "warn".to_string(),
        }
    }

    /// Resolves `--log-dir` to an absolute path against the working directory.
    pub fn resolved_log_dir(&self) -> std::io::Result<Option<PathBuf>> {
        match &self.log_dir {
            Some(dir) if dir.is_relative() => Ok(Some(std::env::current_dir()?.join(dir))),
            Some(dir) => Ok(Some(dir.clone())),
            None => Ok(None),
        }
    }
}
