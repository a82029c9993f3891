//! NoteHub notes service: list, create and delete notes.

pub mod api_types;
pub mod client;
pub mod types;

pub use client::NoteHubClient;
pub use types::{CreateNotePayload, Note, NoteTag, PayloadErrors};
