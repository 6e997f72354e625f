// src/application/mod.rs
pub mod alert;
pub mod driver;
pub mod notes_api;
pub mod operation;
pub mod screen;

pub use alert::{Alert, AlertKind};
pub use driver::ScreenDriver;
pub use notes_api::NotesApi;
pub use operation::{
    BusyPolicy, Operation, Reply, Request, RequestId, RequestKind, ResponseOrdering,
    ScreenOptions,
};
pub use screen::{Controls, EditModal, NotesScreen};
