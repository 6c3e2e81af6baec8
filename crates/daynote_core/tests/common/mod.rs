#![allow(dead_code)]

use daynote_core::repo::notes_app_repo::{body_script, count_script, metadata_script};
use daynote_core::{AutomationBridge, BodyFormat, BridgeError, BridgeResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory bridge answering the exact scripts the reader sends.
#[derive(Default)]
pub struct ScriptedBridge {
    replies: HashMap<String, BridgeResult<String>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, total: usize) -> Self {
        self.replies
            .insert(count_script().to_string(), Ok(total.to_string()));
        self
    }

    pub fn with_failing_count(mut self) -> Self {
        self.replies.insert(
            count_script().to_string(),
            Err(BridgeError::Execution("Notes is not running".to_string())),
        );
        self
    }

    pub fn with_note(mut self, index: usize, title: &str, timestamp: &str, body: &str) -> Self {
        self.replies.insert(
            metadata_script(index),
            Ok(format!("{title}|||{timestamp}|||END_DATE|||")),
        );
        self.replies
            .insert(body_script(index, BodyFormat::Html), Ok(body.to_string()));
        self
    }

    pub fn with_metadata_output(mut self, index: usize, output: &str) -> Self {
        self.replies
            .insert(metadata_script(index), Ok(output.to_string()));
        self
    }

    pub fn with_failing_metadata(mut self, index: usize) -> Self {
        self.replies.insert(
            metadata_script(index),
            Err(BridgeError::Timeout {
                after: std::time::Duration::from_secs(10),
            }),
        );
        self
    }

    pub fn with_failing_body(mut self, index: usize) -> Self {
        self.replies.insert(
            body_script(index, BodyFormat::Html),
            Err(BridgeError::Execution(format!(
                "Notes got an error: Can’t get body of note {index}."
            ))),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl AutomationBridge for ScriptedBridge {
    fn run(&self, script: &str) -> BridgeResult<String> {
        self.calls.borrow_mut().push(script.to_string());
        self.replies.get(script).cloned().unwrap_or_else(|| {
            Err(BridgeError::Execution(
                "Notes got an error: Can’t get note.".to_string(),
            ))
        })
    }
}
