use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use notes_screen::domain::{Note, NoteDraft, NoteId, Quote};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Default)]
struct ServerState {
    notes: Vec<Note>,
    next_id: NoteId,
    quote: Option<Quote>,
    fail_next_mutation: Option<String>,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<ServerState>>;

/// In-process notes backend serving the same routes as the real server
#[allow(dead_code)]
pub struct TestServer {
    pub base_url: String,
    state: Shared,
    _handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
    /// Start on an ephemeral localhost port with `notes` stored
    pub async fn start(notes: Vec<Note>) -> Result<Self> {
        let next_id = notes.iter().map(|n| n.id).max().unwrap_or(0);
        let state: Shared = Arc::new(Mutex::new(ServerState {
            notes,
            next_id,
            ..ServerState::default()
        }));

        let app = Router::new()
            .route("/api/quote", get(get_quote))
            .route("/api/notes", get(list_notes).post(create_note))
            .route("/api/notes/:id", axum::routing::put(update_note).delete(delete_note))
            .with_state(state.clone());

        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(addr)
            .await
            .context("Failed to bind test server")?;
        let port = listener.local_addr()?.port();

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{port}/api"),
            state,
            _handle: handle,
        })
    }

    pub fn set_quote(&self, quote: Quote) {
        self.state.lock().unwrap().quote = Some(quote);
    }

    /// Answer the next create, update or delete with HTTP 200 and `{"error": message}`
    pub fn fail_next_mutation(&self, message: &str) {
        self.state.lock().unwrap().fail_next_mutation = Some(message.to_string());
    }

    /// Requests received so far, as `"METHOD /path"`
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.clone()
    }
}

/// A localhost address nothing listens on
#[allow(dead_code)]
pub async fn unused_base_url() -> Result<String> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}/api"))
}

#[allow(dead_code)]
pub fn note(id: NoteId, title: &str, description: &str, timestamp: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        description: description.to_string(),
        timestamp: timestamp.to_string(),
    }
}

async fn get_quote(State(state): State<Shared>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /quote".to_string());
    match &state.quote {
        Some(quote) => Json(json!(quote)),
        None => Json(json!({ "error": "No quotes available" })),
    }
}

async fn list_notes(State(state): State<Shared>) -> Json<Vec<Note>> {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /notes".to_string());
    Json(state.notes.clone())
}

async fn create_note(
    State(state): State<Shared>,
    Json(draft): Json<NoteDraft>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.requests.push("POST /notes".to_string());
    if let Some(message) = state.fail_next_mutation.take() {
        return (StatusCode::OK, Json(json!({ "error": message })));
    }
    state.next_id += 1;
    let note = Note {
        id: state.next_id,
        title: draft.title,
        description: draft.description,
        timestamp: format!("t{}", state.next_id),
    };
    state.notes.push(note.clone());
    (StatusCode::CREATED, Json(json!(note)))
}

async fn update_note(
    State(state): State<Shared>,
    Path(id): Path<NoteId>,
    Json(draft): Json<NoteDraft>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /notes/{id}"));
    if let Some(message) = state.fail_next_mutation.take() {
        return (StatusCode::OK, Json(json!({ "error": message })));
    }
    match state.notes.iter_mut().find(|n| n.id == id) {
        Some(note) => {
            note.title = draft.title;
            note.description = draft.description;
            (StatusCode::OK, Json(json!(note)))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Note not found" }))),
    }
}

async fn delete_note(State(state): State<Shared>, Path(id): Path<NoteId>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /notes/{id}"));
    if let Some(message) = state.fail_next_mutation.take() {
        return (StatusCode::OK, Json(json!({ "error": message })));
    }
    let before = state.notes.len();
    state.notes.retain(|n| n.id != id);
    if state.notes.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Note not found" })));
    }
    (StatusCode::OK, Json(json!({})))
}
