// src/application/driver.rs
use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, instrument};

use crate::application::notes_api::NotesApi;
use crate::application::operation::{Reply, Request, RequestId, RequestKind};
use crate::application::screen::NotesScreen;

/// Runs the requests a [`NotesScreen`] asks for against a [`NotesApi`].
///
/// Outstanding requests run concurrently and their replies are applied in
/// completion order, so overlapping fetches behave last-writer-wins.
pub struct ScreenDriver<A: NotesApi> {
    api: A,
    screen: NotesScreen,
}

impl<A: NotesApi> ScreenDriver<A> {
    pub fn new(api: A, screen: NotesScreen) -> Self {
        Self { api, screen }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn screen(&self) -> &NotesScreen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut NotesScreen {
        &mut self.screen
    }

    pub fn into_screen(self) -> NotesScreen {
        self.screen
    }

    pub async fn mount(&mut self) {
        let requests = self.screen.mount();
        self.run(requests).await;
    }

    /// Perform `requests` and every follow-up they trigger until none remain.
    pub async fn run(&mut self, requests: impl IntoIterator<Item = Request>) {
        let api = &self.api;
        let screen = &mut self.screen;

        let mut pending: FuturesUnordered<_> =
            requests.into_iter().map(|r| perform(api, r)).collect();

        while let Some((id, reply)) = pending.next().await {
            for follow_up in screen.apply(id, reply) {
                pending.push(perform(api, follow_up));
            }
        }
        debug!("Driver idle");
    }
}

#[instrument(level = "debug", skip(api, request), fields(id = %request.id))]
async fn perform<A: NotesApi>(api: &A, request: Request) -> (RequestId, Reply) {
    let Request { id, kind } = request;
    let reply = match kind {
        RequestKind::FetchQuote => Reply::Quote(api.fetch_quote().await),
        RequestKind::FetchNotes => Reply::Notes(api.list_notes().await),
        RequestKind::CreateNote(draft) => Reply::Saved(api.create_note(&draft).await),
        RequestKind::UpdateNote(note_id, draft) => {
            Reply::Saved(api.update_note(note_id, &draft).await)
        }
        RequestKind::DeleteNote(note_id) => Reply::Saved(api.delete_note(note_id).await),
    };
    (id, reply)
}
