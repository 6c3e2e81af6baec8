//! Automation bridge between core and the Notes application.
//!
//! # Responsibility
//! - Define the single `run(script)` contract every Notes query goes through.
//! - Report failures as values; callers decide whether a failure means
//!   "no data".
//!
//! # Invariants
//! - Successful output is trimmed of surrounding whitespace.
//! - Bridge implementations never panic on script or process failures.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod osascript;

pub use osascript::{OsascriptBridge, DEFAULT_SCRIPT_TIMEOUT};

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failure of a single automation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The script did not finish inside the configured wait.
    Timeout { after: Duration },
    /// The interpreter could not start or exited non-zero.
    Execution(String),
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout { after } => {
                write!(f, "automation script timed out after {}s", after.as_secs())
            }
            Self::Execution(details) => write!(f, "automation script failed: {details}"),
        }
    }
}

impl Error for BridgeError {}

/// Runs one automation script and returns its textual result.
pub trait AutomationBridge {
    fn run(&self, script: &str) -> BridgeResult<String>;
}

impl<B: AutomationBridge + ?Sized> AutomationBridge for &B {
    fn run(&self, script: &str) -> BridgeResult<String> {
        (**self).run(script)
    }
}
