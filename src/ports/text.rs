// src/ports/text.rs
use tracing::instrument;

use crate::application::{Alert, Controls, EditModal, NotesScreen};
use crate::constants::{EMPTY_NOTES, LABEL_CANCEL, LABEL_REFRESH_QUOTE, QUOTE_LOAD_FAILED};
use crate::domain::Note;

const RULE: &str = "----------------------------------------";

/// Renders the screen as plain terminal text.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Whole screen: quote panel, create form, list, and the edit overlay if open.
    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, screen: &NotesScreen) -> String {
        let controls = screen.controls();
        let mut out = String::new();
        out.push_str(&self.render_quote_panel(screen));
        out.push('\n');
        out.push_str(&self.render_form(screen, &controls));
        out.push('\n');
        out.push_str(&self.render_list(screen.notes(), controls.list_refreshing));
        if let Some(editor) = screen.editor() {
            out.push('\n');
            out.push_str(&self.render_edit_modal(editor, &controls));
        }
        out
    }

    pub fn render_quote_panel(&self, screen: &NotesScreen) -> String {
        let mut out = String::new();
        if screen.is_quote_loading() {
            out.push_str("  Loading quote...\n");
        } else if let Some(quote) = screen.quote() {
            out.push_str(&format!("  \"{}\"\n      - {}\n", quote.quote, quote.author));
        } else {
            out.push_str(&format!("  {QUOTE_LOAD_FAILED}\n"));
        }
        out.push_str(&button(LABEL_REFRESH_QUOTE, screen.controls().refresh_quote_enabled));
        out.push('\n');
        out
    }

    fn render_form(&self, screen: &NotesScreen, controls: &Controls) -> String {
        let form = screen.form();
        let mut out = String::from("Add New Note\n");
        out.push_str(&format!("  Title:       {}\n", field(&form.title, "Title")));
        out.push_str(&format!(
            "  Description: {}\n",
            field(&form.description, "Description")
        ));
        out.push_str(&button(controls.add_label, controls.form_enabled));
        out.push('\n');
        out
    }

    pub fn render_list(&self, notes: &[Note], refreshing: bool) -> String {
        let mut out = String::from("Your Notes");
        if refreshing {
            out.push_str(" (refreshing...)");
        }
        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
        if notes.is_empty() {
            out.push_str(&format!("  {EMPTY_NOTES}\n"));
            return out;
        }
        for note in notes {
            out.push_str(&self.render_row(note));
            out.push_str(RULE);
            out.push('\n');
        }
        out
    }

    pub fn render_row(&self, note: &Note) -> String {
        let mut out = format!("  [{}] {}\n", note.id, note.title);
        for line in note.description.lines() {
            out.push_str(&format!("      {line}\n"));
        }
        out.push_str(&format!("      {}\n", note.timestamp));
        out.push_str("      [Edit] [Delete]\n");
        out
    }

    fn render_edit_modal(&self, editor: &EditModal, controls: &Controls) -> String {
        format!(
            "== Edit Note [{}] ==\n  Title:       {}\n  Description: {}\n{} {}\n",
            editor.note_id,
            field(&editor.draft.title, "Title"),
            field(&editor.draft.description, "Description"),
            button(LABEL_CANCEL, controls.modal_enabled),
            button(controls.save_label, controls.modal_enabled)
        )
    }

    /// `Title: message`, one alert per line.
    pub fn render_alerts(&self, alerts: &[Alert]) -> String {
        alerts
            .iter()
            .map(|a| format!("{}: {}\n", a.kind.title(), a.message))
            .collect()
    }
}

fn field(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("<{placeholder}>")
    } else {
        value.to_string()
    }
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("[{label}] (disabled)")
    }
}
