//! Operation Intents
//!
//! A user's requested mutation, carried from the view that raised it to the
//! coordinator. Lives only for one dispatch.

use std::fmt;

use crate::model::{NewNote, NoteId};

/// Which write an intent asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Delete,
    Archive,
    Unarchive,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Create,
        OperationKind::Delete,
        OperationKind::Archive,
        OperationKind::Unarchive,
    ];

    /// Label restored on the triggering control after the cycle
    pub fn idle_label(self) -> &'static str {
        match self {
            OperationKind::Create => "Make Note",
            OperationKind::Delete => "Delete",
            OperationKind::Archive => "Archive",
            OperationKind::Unarchive => "Unarchive",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Delete => "delete",
            OperationKind::Archive => "archive",
            OperationKind::Unarchive => "unarchive",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a triggering control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId(String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for a per-note action button, e.g. `archive:notes-abc`
    pub fn for_note(kind: OperationKind, id: &NoteId) -> Self {
        Self(format!("{}:{}", kind, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentPayload {
    Create(NewNote),
    Target(NoteId),
}

/// Anything that can act as a triggering control
pub trait Trigger {
    fn control_id(&self) -> ControlId;
}

/// `{ kind, payload, trigger }` for one dispatch
#[derive(Debug, Clone)]
pub struct Intent<C> {
    pub kind: OperationKind,
    pub payload: IntentPayload,
    pub trigger: C,
}

impl<C> Intent<C> {
    pub fn create(note: NewNote, trigger: C) -> Self {
        Self {
            kind: OperationKind::Create,
            payload: IntentPayload::Create(note),
            trigger,
        }
    }

    pub fn delete(id: NoteId, trigger: C) -> Self {
        Self::targeted(OperationKind::Delete, id, trigger)
    }

    pub fn archive(id: NoteId, trigger: C) -> Self {
        Self::targeted(OperationKind::Archive, id, trigger)
    }

    pub fn unarchive(id: NoteId, trigger: C) -> Self {
        Self::targeted(OperationKind::Unarchive, id, trigger)
    }

    fn targeted(kind: OperationKind, id: NoteId, trigger: C) -> Self {
        Self {
            kind,
            payload: IntentPayload::Target(id),
            trigger,
        }
    }
}
