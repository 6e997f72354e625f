// src/ports/json.rs
use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::{EditModal, NotesScreen, Operation, RequestId};
use crate::domain::{Note, Quote};

#[derive(Debug, Serialize)]
struct InFlight {
    request: RequestId,
    operation: Operation,
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    quote: Option<&'a Quote>,
    notes: &'a [Note],
    #[serde(skip_serializing_if = "Option::is_none")]
    editing: Option<&'a EditModal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    in_flight: Vec<InFlight>,
}

/// Renders the screen's data as pretty JSON.
#[derive(Debug, Default)]
pub struct JsonPresenter;

impl JsonPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, screen: &NotesScreen) -> Result<String> {
        let snapshot = Snapshot {
            quote: screen.quote(),
            notes: screen.notes(),
            editing: screen.editor(),
            in_flight: screen
                .in_flight()
                .map(|(request, operation)| InFlight { request, operation })
                .collect(),
        };
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize screen to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Reply;
    use serde_json::Value;

    #[test]
    fn given_loaded_screen_when_rendering_json_then_contains_quote_and_notes() {
        // Arrange
        let mut screen = NotesScreen::default();
        let requests = screen.mount();
        screen.apply(
            requests[0].id,
            Reply::Quote(Ok(Quote {
                id: 3,
                quote: "Q".to_string(),
                author: "W".to_string(),
            })),
        );
        screen.apply(
            requests[1].id,
            Reply::Notes(Ok(vec![Note {
                id: 1,
                title: "A".to_string(),
                description: "B".to_string(),
                timestamp: "t1".to_string(),
            }])),
        );

        // Act
        let json = JsonPresenter::new().render(&screen).expect("Serializes");
        let value: Value = serde_json::from_str(&json).expect("Valid JSON");

        // Assert
        assert_eq!(value["quote"]["author"], "W");
        assert_eq!(value["notes"][0]["title"], "A");
        assert_eq!(value["notes"][0]["timestamp"], "t1");
        assert!(value.get("editing").is_none());
        assert!(value.get("in_flight").is_none());
    }

    #[test]
    fn given_pending_delete_when_rendering_json_then_lists_in_flight_operation() {
        let mut screen = NotesScreen::default();
        screen.delete_note(8);

        let json = JsonPresenter::new().render(&screen).expect("Serializes");
        let value: Value = serde_json::from_str(&json).expect("Valid JSON");

        assert_eq!(value["quote"], Value::Null);
        assert_eq!(value["in_flight"][0]["operation"]["op"], "deleting");
        assert_eq!(value["in_flight"][0]["operation"]["id"], 8);
        assert_eq!(value["in_flight"][0]["request"], 1);
    }
}
