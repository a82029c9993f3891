use chrono::{DateTime, Utc};
use serde::Serialize;

/// Note category, as accepted by NoteHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteTag {
  Todo,
  Work,
  Personal,
  Meeting,
  Shopping,
}

impl NoteTag {
  pub const ALL: [NoteTag; 5] = [
    NoteTag::Todo,
    NoteTag::Work,
    NoteTag::Personal,
    NoteTag::Meeting,
    NoteTag::Shopping,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      NoteTag::Todo => "Todo",
      NoteTag::Work => "Work",
      NoteTag::Personal => "Personal",
      NoteTag::Meeting => "Meeting",
      NoteTag::Shopping => "Shopping",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
  }

  /// Next tag in [`NoteTag::ALL`], wrapping around
  pub fn next(self) -> Self {
    let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
    Self::ALL[(idx + 1) % Self::ALL.len()]
  }

  pub fn prev(self) -> Self {
    let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
    Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

impl std::fmt::Display for NoteTag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A note for list and detail display
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
  pub id: String,
  pub title: String,
  pub content: String,
  /// Raw tag name; unknown tags are kept as sent by the server
  pub tag: String,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /notes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateNotePayload {
  pub title: String,
  pub content: String,
  pub tag: NoteTag,
}

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 50;
pub const CONTENT_MAX: usize = 500;

/// Per-field validation failures of a note draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadErrors {
  pub title: Option<String>,
  pub content: Option<String>,
}

impl PayloadErrors {
  pub fn is_empty(&self) -> bool {
    self.title.is_none() && self.content.is_none()
  }
}

impl CreateNotePayload {
  /// Trim and validate a draft, returning the payload to submit.
  pub fn validate(title: &str, content: &str, tag: NoteTag) -> Result<Self, PayloadErrors> {
    let title = title.trim();
    let content = content.trim();
    let mut errors = PayloadErrors::default();

    let title_len = title.chars().count();
    if title_len == 0 {
      errors.title = Some("Title is required".to_string());
    } else if title_len < TITLE_MIN {
      errors.title = Some(format!("Title must be at least {} characters", TITLE_MIN));
    } else if title_len > TITLE_MAX {
      errors.title = Some(format!("Title must be at most {} characters", TITLE_MAX));
    }

    if content.chars().count() > CONTENT_MAX {
      errors.content = Some(format!("Content must be at most {} characters", CONTENT_MAX));
    }

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(Self {
      title: title.to_string(),
      content: content.to_string(),
      tag,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tag_cycle_wraps() {
    assert_eq!(NoteTag::Todo.next(), NoteTag::Work);
    assert_eq!(NoteTag::Shopping.next(), NoteTag::Todo);
    assert_eq!(NoteTag::Todo.prev(), NoteTag::Shopping);
  }

  #[test]
  fn test_tag_parse() {
    assert_eq!(NoteTag::parse("meeting"), Some(NoteTag::Meeting));
    assert_eq!(NoteTag::parse("Holiday"), None);
  }

  #[test]
  fn test_payload_serializes_tag_name() {
    let payload = CreateNotePayload {
      title: "Groceries".into(),
      content: "milk".into(),
      tag: NoteTag::Shopping,
    };
    assert_eq!(
      serde_json::to_value(&payload).unwrap(),
      serde_json::json!({"title": "Groceries", "content": "milk", "tag": "Shopping"})
    );
  }

  #[test]
  fn test_validate_trims_and_accepts() {
    let payload = CreateNotePayload::validate("  Standup ", "", NoteTag::Meeting).unwrap();
    assert_eq!(payload.title, "Standup");
    assert_eq!(payload.content, "");
  }

  #[test]
  fn test_validate_title_bounds() {
    let err = CreateNotePayload::validate("", "", NoteTag::Todo).unwrap_err();
    assert_eq!(err.title.as_deref(), Some("Title is required"));

    let err = CreateNotePayload::validate("ab", "", NoteTag::Todo).unwrap_err();
    assert!(err.title.unwrap().contains("at least 3"));

    let long = "x".repeat(51);
    let err = CreateNotePayload::validate(&long, "", NoteTag::Todo).unwrap_err();
    assert!(err.title.unwrap().contains("at most 50"));
  }

  #[test]
  fn test_validate_content_limit() {
    let long = "y".repeat(501);
    let err = CreateNotePayload::validate("Title", &long, NoteTag::Work).unwrap_err();
    assert!(err.title.is_none());
    assert!(err.content.is_some());
  }
}
