// src/application/notes_api.rs
use async_trait::async_trait;

use crate::domain::{ApiError, Note, NoteDraft, NoteId, Quote};

/// The remote notes server as seen by the screen.
///
/// Every call resolves to a single typed result: implementations fold
/// transport failures, undecodable bodies and in-payload `error` fields into
/// [`ApiError`].
#[async_trait]
pub trait NotesApi {
    async fn fetch_quote(&self) -> Result<Quote, ApiError>;

    /// Full note collection, in server order.
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    async fn create_note(&self, draft: &NoteDraft) -> Result<(), ApiError>;

    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<(), ApiError>;

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError>;
}
