// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::env;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NotesApi;
use crate::domain::{ApiError, Note, NoteDraft, NoteId, Quote};

/// A call received by [`MockNotesApi`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FetchQuote,
    ListNotes,
    Create(NoteDraft),
    Update(NoteId, NoteDraft),
    Delete(NoteId),
}

struct Scripted<T> {
    result: Result<T, ApiError>,
    delay: Duration,
}

struct MockState {
    notes: Vec<Note>,
    next_id: NoteId,
    quote: Option<Quote>,
    quote_replies: VecDeque<Scripted<Quote>>,
    list_replies: VecDeque<Scripted<Vec<Note>>>,
    mutation_failures: VecDeque<ApiError>,
    calls: Vec<RecordedCall>,
}

/// In-memory notes server for exercising the screen without a network.
///
/// Create, update and delete really change the stored notes, so a re-fetch
/// after a mutation sees the result. Scripted replies take precedence over
/// the stored state and are consumed one per call.
///
/// # Examples
///
/// ```
/// use notes_screen::util::testing::MockNotesApi;
/// use notes_screen::domain::{ApiError, Note};
/// use std::time::Duration;
///
/// let mock = MockNotesApi::builder()
///     .with_note(Note {
///         id: 1,
///         title: "A".to_string(),
///         description: "B".to_string(),
///         timestamp: "t1".to_string(),
///     })
///     .with_list_reply(Err(ApiError::transport("offline")), Duration::ZERO)
///     .build();
/// ```
pub struct MockNotesApi {
    state: Mutex<MockState>,
}

impl MockNotesApi {
    pub fn builder() -> MockNotesApiBuilder {
        MockNotesApiBuilder::new()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Notes currently stored on the mock server.
    pub fn stored_notes(&self) -> Vec<Note> {
        self.state().notes.clone()
    }

    fn record(&self, call: RecordedCall) -> MutexGuard<'_, MockState> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }

    fn take_mutation_failure(&self, call: RecordedCall) -> Option<ApiError> {
        self.record(call).mutation_failures.pop_front()
    }
}

async fn deliver<T>(scripted: Scripted<T>) -> Result<T, ApiError> {
    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }
    scripted.result
}

#[async_trait]
impl NotesApi for MockNotesApi {
    async fn fetch_quote(&self) -> Result<Quote, ApiError> {
        let scripted = {
            let mut state = self.record(RecordedCall::FetchQuote);
            state.quote_replies.pop_front().unwrap_or_else(|| Scripted {
                result: state
                    .quote
                    .clone()
                    .ok_or_else(|| ApiError::transport("no quote configured")),
                delay: Duration::ZERO,
            })
        };
        deliver(scripted).await
    }

    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let scripted = {
            let mut state = self.record(RecordedCall::ListNotes);
            state.list_replies.pop_front().unwrap_or_else(|| Scripted {
                result: Ok(state.notes.clone()),
                delay: Duration::ZERO,
            })
        };
        deliver(scripted).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<(), ApiError> {
        if let Some(err) = self.take_mutation_failure(RecordedCall::Create(draft.clone())) {
            return Err(err);
        }
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        state.notes.push(Note {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            timestamp: format!("t{id}"),
        });
        Ok(())
    }

    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<(), ApiError> {
        if let Some(err) = self.take_mutation_failure(RecordedCall::Update(id, draft.clone())) {
            return Err(err);
        }
        let mut state = self.state();
        let note = state
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ApiError::application("Note not found"))?;
        note.title = draft.title.clone();
        note.description = draft.description.clone();
        Ok(())
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError> {
        if let Some(err) = self.take_mutation_failure(RecordedCall::Delete(id)) {
            return Err(err);
        }
        let mut state = self.state();
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        if state.notes.len() == before {
            return Err(ApiError::application("Note not found"));
        }
        Ok(())
    }
}

/// Builder for MockNotesApi
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNotesApiBuilder {
    state: MockState,
}

impl MockNotesApiBuilder {
    pub fn new() -> Self {
        Self {
            state: MockState {
                notes: Vec::new(),
                next_id: 0,
                quote: None,
                quote_replies: VecDeque::new(),
                list_replies: VecDeque::new(),
                mutation_failures: VecDeque::new(),
                calls: Vec::new(),
            },
        }
    }

    /// Store a note; later creates get ids above the highest stored id
    pub fn with_note(mut self, note: Note) -> Self {
        self.state.next_id = self.state.next_id.max(note.id);
        self.state.notes.push(note);
        self
    }

    /// Quote served whenever no scripted quote reply is queued
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.state.quote = Some(quote);
        self
    }

    /// Queue the reply for the next quote fetch, resolved after `delay`
    pub fn with_quote_reply(mut self, result: Result<Quote, ApiError>, delay: Duration) -> Self {
        self.state
            .quote_replies
            .push_back(Scripted { result, delay });
        self
    }

    /// Queue the reply for the next list fetch, resolved after `delay`
    pub fn with_list_reply(mut self, result: Result<Vec<Note>, ApiError>, delay: Duration) -> Self {
        self.state
            .list_replies
            .push_back(Scripted { result, delay });
        self
    }

    /// Fail the next create, update or delete with `err`
    pub fn with_mutation_failure(mut self, err: ApiError) -> Self {
        self.state.mutation_failures.push_back(err);
        self
    }

    pub fn build(self) -> MockNotesApi {
        MockNotesApi {
            state: Mutex::new(self.state),
        }
    }
}

impl Default for MockNotesApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "hyper_util", "reqwest", "mio", "h2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    fn note(id: NoteId) -> Note {
        Note {
            id,
            title: format!("Title {id}"),
            description: "Body".to_string(),
            timestamp: format!("t{id}"),
        }
    }

    #[tokio::test]
    async fn given_stored_notes_when_creating_then_assigns_next_id() {
        let mock = MockNotesApi::builder().with_note(note(5)).build();

        mock.create_note(&NoteDraft::new("New", "Body"))
            .await
            .expect("Create should succeed");

        let ids: Vec<_> = mock.stored_notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[tokio::test]
    async fn given_scripted_list_reply_when_listing_then_scripted_reply_used_once() {
        let mock = MockNotesApi::builder()
            .with_note(note(1))
            .with_list_reply(Ok(vec![]), Duration::ZERO)
            .build();

        let first = mock.list_notes().await.expect("List should succeed");
        let second = mock.list_notes().await.expect("List should succeed");

        assert!(first.is_empty());
        assert_eq!(second.len(), 1);
        assert_eq!(mock.calls(), vec![RecordedCall::ListNotes, RecordedCall::ListNotes]);
    }

    #[tokio::test]
    async fn given_mutation_failure_when_deleting_then_note_kept() {
        let mock = MockNotesApi::builder()
            .with_note(note(1))
            .with_mutation_failure(ApiError::application("locked"))
            .build();

        let result = mock.delete_note(1).await;

        assert_eq!(result, Err(ApiError::application("locked")));
        assert_eq!(mock.stored_notes().len(), 1);
    }

    #[tokio::test]
    async fn given_missing_note_when_updating_then_application_error() {
        let mock = MockNotesApi::builder().build();

        let result = mock.update_note(3, &NoteDraft::new("A", "B")).await;

        assert!(matches!(result, Err(ApiError { kind: crate::domain::ErrorKind::Application, .. })));
    }
}
