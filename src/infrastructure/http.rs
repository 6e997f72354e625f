// src/infrastructure/http.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::application::NotesApi;
use crate::domain::{ApiError, Note, NoteDraft, NoteId, Quote};

/// [`NotesApi`] over plain JSON/HTTP. No auth, no retries.
pub struct HttpNotesApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNotesApi {
    /// `timeout` of `None` leaves reqwest's default (no timeout).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        debug!(base_url, ?timeout, "Created HTTP notes client");
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and classify its body. The status code is only logged:
    /// success is decided by the payload.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read body: {e}")))?;
        debug!(%status, bytes = body.len(), "Received response");
        if !status.is_success() {
            warn!(%status, "Non-success status, classifying by body");
        }

        classify_body(&body)
    }
}

/// Parse a response body, turning a truthy top-level `error` field into an
/// application failure.
pub fn classify_body(body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::decode(format!("Response is not JSON: {e}")))?;

    if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(ApiError::application(message));
    }
    Ok(value)
}

/// JSON truthiness: everything except `null`, `false`, `0` and `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::decode(format!("Unexpected response shape: {e}")))
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_quote(&self) -> Result<Quote, ApiError> {
        let value = self.send(self.client.get(self.url("/quote"))).await?;
        decode(value)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let value = self.send(self.client.get(self.url("/notes"))).await?;
        decode(value)
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, draft: &NoteDraft) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("/notes")).json(draft))
            .await
            .map(|_| ())
    }

    #[instrument(level = "debug", skip(self))]
    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<(), ApiError> {
        self.send(self.client.put(self.url(&format!("/notes/{id}"))).json(draft))
            .await
            .map(|_| ())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url(&format!("/notes/{id}"))))
            .await
            .map(|_| ())
    }
}
