// src/constants.rs
//
// Fixed endpoint and user-facing strings shown by the screen.

/// Base address of the notes server. Overridable through config or `--base-url`.
pub const DEFAULT_BASE_URL: &str = "http://110.239.71.90:5836/api";

/// Name of the config file looked up under the user config directory.
pub const CONFIG_DIR_NAME: &str = "notes-screen";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill all fields";

pub const MSG_FETCH_QUOTE_FAILED: &str = "Failed to fetch quote";
pub const MSG_FETCH_NOTES_FAILED: &str = "Failed to fetch notes";
pub const MSG_ADD_FAILED: &str = "Failed to add note";
pub const MSG_UPDATE_FAILED: &str = "Failed to update note";
pub const MSG_DELETE_FAILED: &str = "Failed to delete note";

pub const MSG_ADDED: &str = "Note added successfully";
pub const MSG_UPDATED: &str = "Note updated successfully";
pub const MSG_DELETED: &str = "Note deleted successfully";

pub const QUOTE_LOAD_FAILED: &str = "Failed to load quote";
pub const EMPTY_NOTES: &str = "No notes yet. Add your first note above!";

pub const LABEL_ADD: &str = "Add Note";
pub const LABEL_ADDING: &str = "Adding...";
pub const LABEL_SAVE: &str = "Save Changes";
pub const LABEL_SAVING: &str = "Saving...";
pub const LABEL_REFRESH_QUOTE: &str = "Refresh Quote";
pub const LABEL_CANCEL: &str = "Cancel";
