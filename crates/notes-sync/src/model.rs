//! Note Models
//!
//! Data structures matching the remote notes service.

use std::fmt;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Characters escaped when an id is placed into a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Identity token assigned by the remote service.
///
/// The service may hand out either strings or integers; the client never
/// interprets the value, it only echoes it back in paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl NoteId {
    /// Id rendered as one percent-encoded URL path segment
    pub fn path_segment(&self) -> String {
        match self {
            NoteId::Number(n) => n.to_string(),
            // `.` and `..` would be collapsed by url normalisation
            NoteId::Text(s) if s == "." || s == ".." => s.replace('.', "%2E"),
            NoteId::Text(s) => utf8_percent_encode(s, PATH_SEGMENT).to_string(),
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Number(n) => write!(f, "{}", n),
            NoteId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        NoteId::Text(s.to_string())
    }
}

impl From<i64> for NoteId {
    fn from(n: i64) -> Self {
        NoteId::Number(n)
    }
}

/// A note as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// List response envelope; `status`/`message` siblings are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct NotesEnvelope {
    pub data: Vec<Note>,
}

/// Order notes newest first. Equal timestamps keep their service order.
pub fn sort_most_recent_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
