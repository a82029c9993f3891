use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Events emitted by search input that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Search text changed (emitted on each keystroke, empty string on cancel)
  Changed(String),
  /// Focus left the box, text persists
  Submitted,
}

/// Toolbar search box, focused with `/`
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn query(&self) -> &str {
    self.input.value()
  }

  /// Focus the box, keeping its text for further editing
  pub fn activate(&mut self) {
    self.active = true;
  }

  /// Handle a key event
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.activate();
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(_) => {
        self.active = false;
        KeyResult::Event(SearchEvent::Submitted)
      }
      InputResult::Cancelled => {
        self.active = false;
        self.input.clear();
        KeyResult::Event(SearchEvent::Changed(String::new()))
      }
      InputResult::Consumed => {
        KeyResult::Event(SearchEvent::Changed(self.input.value().to_string()))
      }
      // Swallow everything else while focused so list shortcuts stay inert
      InputResult::NotHandled => KeyResult::Handled,
    }
  }

  /// Render the box; `hint` fills it while empty and unfocused.
  pub fn render(&self, frame: &mut Frame, area: Rect, hint: &str) {
    let border = if self.active {
      Color::Yellow
    } else {
      Color::DarkGray
    };
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border))
      .title(" Search ");

    let line = if self.active {
      let (before, after) = self.input.split_at_cursor();
      Line::from(vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(before),
        Span::styled("_", Style::default().fg(Color::Yellow)), // Cursor
        Span::raw(after),
      ])
    } else if self.input.is_empty() {
      Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    } else {
      Line::from(Span::raw(self.input.value()))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_slash_activates() {
    let mut search = SearchInput::new();
    assert_eq!(search.handle_key(key(KeyCode::Char('j'))), KeyResult::NotHandled);
    assert_eq!(search.handle_key(key(KeyCode::Char('/'))), KeyResult::Handled);
    assert!(search.is_active());
  }

  #[test]
  fn test_typing_emits_changes() {
    let mut search = SearchInput::new();
    search.activate();
    search.handle_key(key(KeyCode::Char('b')));
    assert_eq!(
      search.handle_key(key(KeyCode::Char('a'))),
      KeyResult::Event(SearchEvent::Changed("ba".to_string()))
    );
  }

  #[test]
  fn test_submit_keeps_text_and_cancel_clears() {
    let mut search = SearchInput::new();
    search.activate();
    search.handle_key(key(KeyCode::Char('x')));
    assert_eq!(
      search.handle_key(key(KeyCode::Enter)),
      KeyResult::Event(SearchEvent::Submitted)
    );
    assert_eq!(search.query(), "x");
    assert!(!search.is_active());

    search.activate();
    assert_eq!(
      search.handle_key(key(KeyCode::Esc)),
      KeyResult::Event(SearchEvent::Changed(String::new()))
    );
    assert_eq!(search.query(), "");
  }
}
