//! Serde-deserializable types matching NoteHub API responses.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::Note;
use crate::query::ListResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNote {
  pub id: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub tag: String,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// `GET /notes` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNotesResponse {
  #[serde(default)]
  pub notes: Vec<ApiNote>,
  #[serde(default)]
  pub total_pages: u32,
}

impl From<ApiNote> for Note {
  fn from(note: ApiNote) -> Self {
    Note {
      id: note.id,
      title: note.title,
      content: note.content,
      tag: note.tag,
      created_at: note.created_at,
      updated_at: note.updated_at,
    }
  }
}

impl From<ApiNotesResponse> for ListResult<Note> {
  fn from(resp: ApiNotesResponse) -> Self {
    ListResult {
      items: resp.notes.into_iter().map(Note::from).collect(),
      total_pages: resp.total_pages,
      // NoteHub reports pages only
      total_items: None,
    }
  }
}
