// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod quote;

pub use error::{ApiError, DomainError, ErrorKind};
pub use note::{Note, NoteDraft, NoteId};
pub use quote::Quote;
