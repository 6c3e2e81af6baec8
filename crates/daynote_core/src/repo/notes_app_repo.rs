//! Notes application reader contracts and AppleScript implementation.
//!
//! # Responsibility
//! - Count notes and fetch one note by 1-based index through the bridge.
//! - Keep AppleScript text and result tokenization inside this module.
//!
//! # Invariants
//! - Title and timestamp come from one script; the body always comes from a
//!   second script so body text can never break the title/date split.
//! - A failed body fetch yields an empty body, not a failed note.
//! - A title containing the field separator still corrupts the split; the
//!   two-script layout only protects against the body.

use crate::bridge::{AutomationBridge, BridgeError};
use crate::model::note::RawNote;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Separator between title and timestamp in the metadata script output.
pub const FIELD_SEPARATOR: &str = "|||";
/// Token closing the timestamp field.
pub const END_MARKER: &str = "END_DATE";

const COUNT_SCRIPT: &str = r#"tell application "Notes" to count notes"#;

pub type ReadResult<T> = Result<T, ReadError>;

/// Failure to read from the Notes application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    Bridge(BridgeError),
    /// Metadata output did not split into title and timestamp.
    Unreadable { index: usize, output: String },
    /// Note indices start at 1.
    InvalidIndex(usize),
    /// Count script returned something other than a non-negative integer.
    InvalidCount(String),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bridge(err) => write!(f, "{err}"),
            Self::Unreadable { index, output } => {
                write!(f, "note {index} returned unreadable metadata `{output}`")
            }
            Self::InvalidIndex(index) => write!(f, "note index {index} is not 1-based"),
            Self::InvalidCount(output) => write!(f, "note count `{output}` is not a number"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bridge(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BridgeError> for ReadError {
    fn from(value: BridgeError) -> Self {
        Self::Bridge(value)
    }
}

/// Which Notes property supplies the body text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyFormat {
    /// The `body` property: HTML as stored by Notes.
    #[default]
    Html,
    /// The `plaintext` property: text rendered by Notes itself.
    Plaintext,
}

impl BodyFormat {
    fn property(self) -> &'static str {
        match self {
            Self::Html => "body",
            Self::Plaintext => "plaintext",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Plaintext => "plaintext",
        }
    }
}

/// Read access to the notes being scanned.
pub trait NoteSource {
    /// Returns the number of notes currently stored.
    fn count_notes(&self) -> ReadResult<usize>;
    /// Fetches one note by 1-based index.
    fn fetch_note(&self, index: usize) -> ReadResult<RawNote>;
}

/// Notes.app reader backed by an automation bridge.
#[derive(Debug, Clone)]
pub struct AppleNotesReader<B: AutomationBridge> {
    bridge: B,
    body_format: BodyFormat,
}

impl<B: AutomationBridge> AppleNotesReader<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            bridge,
            body_format: BodyFormat::default(),
        }
    }

    pub fn with_body_format(mut self, body_format: BodyFormat) -> Self {
        self.body_format = body_format;
        self
    }

    pub fn body_format(&self) -> BodyFormat {
        self.body_format
    }
}

impl<B: AutomationBridge> NoteSource for AppleNotesReader<B> {
    fn count_notes(&self) -> ReadResult<usize> {
        let output = self.bridge.run(count_script())?;
        parse_count(&output)
    }

    fn fetch_note(&self, index: usize) -> ReadResult<RawNote> {
        if index == 0 {
            return Err(ReadError::InvalidIndex(index));
        }

        let output = self.bridge.run(&metadata_script(index))?;
        let (title, raw_modified_at) =
            split_metadata(&output).ok_or_else(|| ReadError::Unreadable {
                index,
                output: output.clone(),
            })?;

        let body = match self.bridge.run(&body_script(index, self.body_format)) {
            Ok(body) => body,
            Err(err) => {
                warn!(
                    "event=note_body_fetch module=repo status=error index={} error={}",
                    index, err
                );
                String::new()
            }
        };

        Ok(RawNote {
            index,
            title,
            raw_modified_at,
            body,
        })
    }
}

/// Script that counts all notes across accounts.
pub fn count_script() -> &'static str {
    COUNT_SCRIPT
}

/// Script returning `title|||<y>-<m>-<d> <h>:<min>:<s>|||END_DATE|||`.
///
/// Date components are emitted as numbers (`month as integer`) so the
/// string does not depend on localized month names.
pub fn metadata_script(index: usize) -> String {
    format!(
        r#"tell application "Notes"
    set theNote to note {index}
    set noteTitle to name of theNote
    set noteModDate to modification date of theNote
    set dateStr to (year of noteModDate as string) & "-" & ¬
        (month of noteModDate as integer as string) & "-" & ¬
        (day of noteModDate as string) & " " & ¬
        (hours of noteModDate as string) & ":" & ¬
        (minutes of noteModDate as string) & ":" & ¬
        (seconds of noteModDate as string)
    return noteTitle & "{FIELD_SEPARATOR}" & dateStr & "{FIELD_SEPARATOR}{END_MARKER}{FIELD_SEPARATOR}"
end tell"#
    )
}

/// Script returning only the body text of one note.
pub fn body_script(index: usize, body_format: BodyFormat) -> String {
    format!(
        r#"tell application "Notes"
    set theNote to note {index}
    return {property} of theNote as string
end tell"#,
        property = body_format.property()
    )
}

/// Splits metadata output into trimmed `(title, timestamp)`.
///
/// Returns `None` when fewer than two fields are present.
pub fn split_metadata(output: &str) -> Option<(String, String)> {
    let mut fields = output.split(FIELD_SEPARATOR);
    let title = fields.next()?;
    let timestamp = fields.next()?;
    Some((
        title.trim().to_string(),
        timestamp.replace(END_MARKER, "").trim().to_string(),
    ))
}

fn parse_count(output: &str) -> ReadResult<usize> {
    let trimmed = output.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ReadError::InvalidCount(trimmed.to_string()));
    }
    trimmed
        .parse::<usize>()
        .map_err(|_| ReadError::InvalidCount(trimmed.to_string()))
}
