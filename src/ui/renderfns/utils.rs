use crate::notehub::NoteTag;
use ratatui::prelude::Color;

/// Truncate a string to a maximum number of chars, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// First line of a possibly multi-line text
pub fn first_line(s: &str) -> &str {
  s.lines().next().unwrap_or("")
}

/// Get the display color for a note tag
pub fn tag_color(tag: &str) -> Color {
  match NoteTag::parse(tag) {
    Some(NoteTag::Todo) => Color::Yellow,
    Some(NoteTag::Work) => Color::Blue,
    Some(NoteTag::Personal) => Color::Magenta,
    Some(NoteTag::Meeting) => Color::Cyan,
    Some(NoteTag::Shopping) => Color::Green,
    None => Color::White,
  }
}

/// Get the display color for a 0-10 movie rating
pub fn rating_color(rating: f64) -> Color {
  if rating >= 7.0 {
    Color::Green
  } else if rating >= 5.0 {
    Color::Yellow
  } else {
    Color::Red
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("crème brûlée", 8), "crème...");
  }

  #[test]
  fn test_first_line() {
    assert_eq!(first_line("milk\neggs"), "milk");
    assert_eq!(first_line(""), "");
  }

  #[test]
  fn test_tag_color() {
    assert_eq!(tag_color("Shopping"), Color::Green);
    assert_eq!(tag_color("Unknown"), Color::White);
  }

  #[test]
  fn test_rating_color() {
    assert_eq!(rating_color(8.1), Color::Green);
    assert_eq!(rating_color(5.0), Color::Yellow);
    assert_eq!(rating_color(2.3), Color::Red);
  }
}
