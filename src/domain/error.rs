// src/domain/error.rs
use std::fmt;

use thiserror::Error;

use crate::domain::NoteId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),
}

/// Which channel a failed API call failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response body.
    Transport,
    /// The body was not JSON, or not the shape the call expects.
    Decode,
    /// The body carried a truthy `error` field.
    Application,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::Application => "application",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Application, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_application_error_when_displaying_then_includes_kind_and_message() {
        let err = ApiError::application("Title required");
        assert_eq!(err.to_string(), "application error: Title required");
        assert_eq!(err.kind, ErrorKind::Application);
    }
}
