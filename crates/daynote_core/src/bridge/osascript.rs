//! `osascript` process bridge.
//!
//! # Responsibility
//! - Spawn one interpreter process per script and wait a bounded time.
//! - Map exit status, timeout and spawn failures to `BridgeError`.
//!
//! # Invariants
//! - The child process is always reaped, including on timeout.
//! - stdout/stderr are drained while waiting so large outputs cannot stall
//!   the child on a full pipe.
//! - `run` returns within the timeout even when a background process keeps
//!   the pipes open after the child exits.

use super::{AutomationBridge, BridgeError, BridgeResult};
use crate::logging::sanitize_message;
use log::{debug, warn};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Default bounded wait for one script.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_PROGRAM: &str = "osascript";
const DEFAULT_SCRIPT_FLAG: &str = "-e";
const MAX_LOGGED_STDERR_CHARS: usize = 240;

/// Bridge that runs scripts through `osascript -e <script>`.
#[derive(Debug, Clone)]
pub struct OsascriptBridge {
    program: PathBuf,
    script_flag: String,
    timeout: Duration,
}

impl Default for OsascriptBridge {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT_TIMEOUT)
    }
}

impl OsascriptBridge {
    /// Creates a bridge using the system `osascript` and the given wait.
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            script_flag: DEFAULT_SCRIPT_FLAG.to_string(),
            timeout,
        }
    }

    /// Replaces the interpreter, e.g. an absolute `osascript` path or a
    /// wrapper script.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Replaces the flag that precedes the script text (`-e` by default).
    pub fn with_script_flag(mut self, flag: impl Into<String>) -> Self {
        self.script_flag = flag.into();
        self
    }
}

impl AutomationBridge for OsascriptBridge {
    fn run(&self, script: &str) -> BridgeResult<String> {
        let started = Instant::now();
        let result = self.run_child(script);
        match &result {
            Ok(output) => debug!(
                "event=script_run module=bridge status=ok elapsed_ms={} output_bytes={}",
                started.elapsed().as_millis(),
                output.len()
            ),
            Err(err) => warn!(
                "event=script_run module=bridge status=error elapsed_ms={} error={}",
                started.elapsed().as_millis(),
                sanitize_message(&err.to_string(), MAX_LOGGED_STDERR_CHARS)
            ),
        }
        result
    }
}

impl OsascriptBridge {
    fn run_child(&self, script: &str) -> BridgeResult<String> {
        let mut child = Command::new(&self.program)
            .arg(&self.script_flag)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                BridgeError::Execution(format!(
                    "failed to execute `{}`: {err}",
                    self.program.display()
                ))
            })?;

        let started = Instant::now();
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BridgeError::Timeout {
                    after: self.timeout,
                });
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BridgeError::Execution(format!(
                    "failed to wait for `{}`: {err}",
                    self.program.display()
                )));
            }
        };

        // A background process spawned by the script can keep the pipes open
        // after the child exits; its output counts against the same budget.
        let timed_out = || BridgeError::Timeout {
            after: self.timeout,
        };
        let stdout = collect(stdout, self.timeout.saturating_sub(started.elapsed()))
            .ok_or_else(timed_out)?;
        let stderr = collect(stderr, self.timeout.saturating_sub(started.elapsed()))
            .ok_or_else(timed_out)?;

        if status.success() {
            Ok(String::from_utf8_lossy(&stdout).trim().to_string())
        } else {
            let details = String::from_utf8_lossy(&stderr).trim().to_string();
            Err(BridgeError::Execution(if details.is_empty() {
                format!("exited with {status}")
            } else {
                details
            }))
        }
    }
}

/// Reads a pipe to its end on a helper thread.
///
/// The thread is never joined; it exits once every writer closes the pipe.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>> {
    pipe.map(|mut pipe| {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            let _ = sender.send(buffer);
        });
        receiver
    })
}

/// Waits up to `remaining` for a drained pipe; `None` means the budget ran out.
fn collect(receiver: Option<Receiver<Vec<u8>>>, remaining: Duration) -> Option<Vec<u8>> {
    let Some(receiver) = receiver else {
        return Some(Vec::new());
    };
    match receiver.recv_timeout(remaining) {
        Ok(buffer) => Some(buffer),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
    }
}
