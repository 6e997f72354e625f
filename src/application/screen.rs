// src/application/screen.rs
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::application::alert::Alert;
use crate::application::operation::{
    BusyPolicy, Operation, Reply, Request, RequestId, RequestKind, ResponseOrdering,
    ScreenOptions,
};
use crate::constants::*;
use crate::domain::{ApiError, DomainError, Note, NoteDraft, NoteId, Quote};

/// The edit overlay: which note is being edited and the fields as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditModal {
    pub note_id: NoteId,
    pub draft: NoteDraft,
}

/// Enabled state and labels of the screen's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub refresh_quote_enabled: bool,
    pub form_enabled: bool,
    pub add_label: &'static str,
    pub modal_enabled: bool,
    pub save_label: &'static str,
    pub list_refreshing: bool,
}

/// View state of the notes screen.
///
/// User actions return the [`Request`]s they need performed; the caller
/// performs them and hands each [`Reply`] back to [`NotesScreen::apply`],
/// which may in turn ask for a re-fetch. The screen never talks to the
/// network itself.
#[derive(Debug, Default)]
pub struct NotesScreen {
    options: ScreenOptions,
    quote: Option<Quote>,
    notes: Vec<Note>,
    form: NoteDraft,
    editor: Option<EditModal>,
    in_flight: BTreeMap<RequestId, Operation>,
    next_request: u64,
    quote_applied: Option<RequestId>,
    notes_applied: Option<RequestId>,
    alerts: Vec<Alert>,
}

impl NotesScreen {
    pub fn new(options: ScreenOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn form(&self) -> &NoteDraft {
        &self.form
    }

    pub fn editor(&self) -> Option<&EditModal> {
        self.editor.as_ref()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Queue an alert raised outside the screen's own actions.
    pub fn raise(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Hand pending alerts to the frontend, oldest first.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    pub fn in_flight(&self) -> impl Iterator<Item = (RequestId, Operation)> + '_ {
        self.in_flight.iter().map(|(id, op)| (*id, *op))
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn is_quote_loading(&self) -> bool {
        self.in_flight
            .values()
            .any(|op| *op == Operation::FetchingQuote)
    }

    /// Coarse loading flag: any notes operation in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.values().any(Operation::is_notes_flow)
    }

    fn any_in_flight(&self, pred: impl Fn(&Operation) -> bool) -> bool {
        self.in_flight.values().any(pred)
    }

    pub fn controls(&self) -> Controls {
        let (creating, updating, refreshing) = match self.options.busy_policy {
            BusyPolicy::Shared => {
                let busy = self.is_busy();
                (busy, busy, busy)
            }
            BusyPolicy::PerOperation => (
                self.any_in_flight(|op| *op == Operation::Creating),
                self.any_in_flight(|op| matches!(op, Operation::Updating(_))),
                self.any_in_flight(|op| *op == Operation::FetchingNotes),
            ),
        };

        Controls {
            refresh_quote_enabled: !self.is_quote_loading(),
            form_enabled: !creating,
            add_label: if creating { LABEL_ADDING } else { LABEL_ADD },
            modal_enabled: !updating,
            save_label: if updating { LABEL_SAVING } else { LABEL_SAVE },
            list_refreshing: refreshing,
        }
    }

    fn issue(&mut self, kind: RequestKind) -> Request {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        let operation = kind.operation();
        self.in_flight.insert(id, operation);
        debug!(%id, ?operation, "Issuing request");
        Request { id, kind }
    }

    /// Initial load: one quote fetch and one notes fetch.
    pub fn mount(&mut self) -> Vec<Request> {
        vec![self.refresh_quote(), self.refresh_notes()]
    }

    /// Not de-duplicated: every call issues a new fetch.
    pub fn refresh_quote(&mut self) -> Request {
        self.issue(RequestKind::FetchQuote)
    }

    pub fn refresh_notes(&mut self) -> Request {
        self.issue(RequestKind::FetchNotes)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// Submit the create form. Returns `None` and raises a validation alert
    /// when either field is blank.
    pub fn submit_create(&mut self) -> Option<Request> {
        if !self.form.is_complete() {
            self.alerts.push(Alert::error(MSG_FILL_ALL_FIELDS));
            return None;
        }
        Some(self.issue(RequestKind::CreateNote(self.form.clone())))
    }

    /// Open the edit overlay pre-filled from the listed note.
    pub fn open_edit(&mut self, note_id: NoteId) -> Result<(), DomainError> {
        let note = self
            .notes
            .iter()
            .find(|n| n.id == note_id)
            .ok_or(DomainError::NoteNotFound(note_id))?;
        self.editor = Some(EditModal {
            note_id,
            draft: NoteDraft::from(note),
        });
        Ok(())
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.draft.title = title.into();
        }
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.draft.description = description.into();
        }
    }

    /// Save the edit overlay. Does nothing without an open overlay.
    pub fn save_edit(&mut self) -> Option<Request> {
        let editor = self.editor.as_ref()?;
        if !editor.draft.is_complete() {
            self.alerts.push(Alert::error(MSG_FILL_ALL_FIELDS));
            return None;
        }
        let kind = RequestKind::UpdateNote(editor.note_id, editor.draft.clone());
        Some(self.issue(kind))
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Delete right away; the row stays until a re-fetch drops it.
    pub fn delete_note(&mut self, note_id: NoteId) -> Request {
        self.issue(RequestKind::DeleteNote(note_id))
    }

    /// Apply the reply to request `id`, returning any follow-up requests.
    #[instrument(level = "debug", skip(self, reply))]
    pub fn apply(&mut self, id: RequestId, reply: Reply) -> Vec<Request> {
        let Some(operation) = self.in_flight.remove(&id) else {
            warn!(%id, "Reply for unknown request ignored");
            return Vec::new();
        };

        match (operation, reply) {
            (Operation::FetchingQuote, Reply::Quote(result)) => {
                self.apply_quote(id, result);
                Vec::new()
            }
            (Operation::FetchingNotes, Reply::Notes(result)) => {
                self.apply_notes(id, result);
                Vec::new()
            }
            (Operation::Creating, Reply::Saved(result)) => self.apply_created(result),
            (Operation::Updating(note_id), Reply::Saved(result)) => {
                self.apply_updated(note_id, result)
            }
            (Operation::Deleting(note_id), Reply::Saved(result)) => {
                self.apply_deleted(note_id, result)
            }
            (operation, reply) => {
                warn!(%id, ?operation, ?reply, "Reply does not match request");
                Vec::new()
            }
        }
    }

    fn is_stale(&self, id: RequestId, applied: Option<RequestId>) -> bool {
        self.options.response_ordering == ResponseOrdering::LatestIssued
            && applied.is_some_and(|last| id < last)
    }

    fn fail(&mut self, err: ApiError, message: &str) {
        error!(error = %err, "{}", message);
        self.alerts.push(Alert::error(message));
    }

    fn apply_quote(&mut self, id: RequestId, result: Result<Quote, ApiError>) {
        match result {
            Ok(_) if self.is_stale(id, self.quote_applied) => {
                debug!(%id, "Dropping quote older than the one shown");
            }
            Ok(quote) => {
                debug!(%id, quote_id = quote.id, "Quote loaded");
                self.quote = Some(quote);
                self.quote_applied = Some(id);
            }
            Err(err) => self.fail(err, MSG_FETCH_QUOTE_FAILED),
        }
    }

    fn apply_notes(&mut self, id: RequestId, result: Result<Vec<Note>, ApiError>) {
        match result {
            Ok(_) if self.is_stale(id, self.notes_applied) => {
                debug!(%id, "Dropping note list older than the one shown");
            }
            Ok(notes) => {
                debug!(%id, count = notes.len(), "Notes loaded");
                self.notes = notes;
                self.notes_applied = Some(id);
            }
            Err(err) => self.fail(err, MSG_FETCH_NOTES_FAILED),
        }
    }

    fn apply_created(&mut self, result: Result<(), ApiError>) -> Vec<Request> {
        match result {
            Ok(()) => {
                info!("Note added");
                self.form.clear();
                let refetch = self.refresh_notes();
                self.alerts.push(Alert::success(MSG_ADDED));
                vec![refetch]
            }
            Err(err) => {
                self.fail(err, MSG_ADD_FAILED);
                Vec::new()
            }
        }
    }

    fn apply_updated(&mut self, note_id: NoteId, result: Result<(), ApiError>) -> Vec<Request> {
        match result {
            Ok(()) => {
                info!(note_id, "Note updated");
                self.editor = None;
                let refetch = self.refresh_notes();
                self.alerts.push(Alert::success(MSG_UPDATED));
                vec![refetch]
            }
            Err(err) => {
                self.fail(err, MSG_UPDATE_FAILED);
                Vec::new()
            }
        }
    }

    fn apply_deleted(&mut self, note_id: NoteId, result: Result<(), ApiError>) -> Vec<Request> {
        match result {
            Ok(()) => {
                info!(note_id, "Note deleted");
                let refetch = self.refresh_notes();
                self.alerts.push(Alert::success(MSG_DELETED));
                vec![refetch]
            }
            Err(err) => {
                self.fail(err, MSG_DELETE_FAILED);
                Vec::new()
            }
        }
    }
}
