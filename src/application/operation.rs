// src/application/operation.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ApiError, Note, NoteDraft, NoteId, Quote};

/// Identifies one issued request. Ids increase in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an in-flight request is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "id", rename_all = "snake_case")]
pub enum Operation {
    FetchingQuote,
    FetchingNotes,
    Creating,
    Updating(NoteId),
    Deleting(NoteId),
}

impl Operation {
    /// Everything except the quote fetch belongs to the notes flow.
    pub fn is_notes_flow(&self) -> bool {
        !matches!(self, Operation::FetchingQuote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    FetchQuote,
    FetchNotes,
    CreateNote(NoteDraft),
    UpdateNote(NoteId, NoteDraft),
    DeleteNote(NoteId),
}

impl RequestKind {
    pub fn operation(&self) -> Operation {
        match self {
            RequestKind::FetchQuote => Operation::FetchingQuote,
            RequestKind::FetchNotes => Operation::FetchingNotes,
            RequestKind::CreateNote(_) => Operation::Creating,
            RequestKind::UpdateNote(id, _) => Operation::Updating(*id),
            RequestKind::DeleteNote(id) => Operation::Deleting(*id),
        }
    }
}

/// A request the screen wants performed against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub kind: RequestKind,
}

/// The outcome of a performed [`Request`], fed back into the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Quote(Result<Quote, ApiError>),
    Notes(Result<Vec<Note>, ApiError>),
    /// Create, update and delete only report success or failure.
    Saved(Result<(), ApiError>),
}

/// How in-flight operations map onto disabled controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusyPolicy {
    /// Any notes operation in flight disables every notes control.
    #[default]
    Shared,
    /// Each operation only affects its own controls.
    PerOperation,
}

/// Which fetch replies are allowed to replace displayed data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Every successful reply is applied; the last one to resolve wins.
    #[default]
    LastResolved,
    /// A reply older than one already applied for the same data is dropped.
    LatestIssued,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenOptions {
    pub busy_policy: BusyPolicy,
    pub response_ordering: ResponseOrdering,
}
