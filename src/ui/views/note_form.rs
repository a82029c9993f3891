use crate::notehub::types::{CONTENT_MAX, TITLE_MAX};
use crate::notehub::{CreateNotePayload, Note, NoteHubClient, NoteTag, PayloadErrors};
use crate::query::{InvalidationHandle, Mutation};
use crate::ui::components::{draw_modal_frame, InputResult, TextInput};
use crate::ui::renderfns::tag_color;
use crate::ui::view::{Shortcut, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
  Title,
  Content,
  Tag,
}

impl Field {
  fn next(self) -> Self {
    match self {
      Field::Title => Field::Content,
      Field::Content => Field::Tag,
      Field::Tag => Field::Title,
    }
  }

  fn prev(self) -> Self {
    match self {
      Field::Title => Field::Tag,
      Field::Content => Field::Title,
      Field::Tag => Field::Content,
    }
  }
}

/// Modal form creating a note. Closes itself once the note is saved.
pub struct NoteFormView {
  client: NoteHubClient,
  create: Mutation<Note>,
  title: TextInput,
  content: TextInput,
  tag: NoteTag,
  focus: Field,
  errors: PayloadErrors,
  closed: bool,
}

impl NoteFormView {
  /// `notes` is invalidated when the note is created
  pub fn new(client: NoteHubClient, notes: InvalidationHandle) -> Self {
    Self {
      client,
      create: Mutation::new().bind(notes),
      title: TextInput::new().with_max_chars(TITLE_MAX),
      content: TextInput::new().with_max_chars(CONTENT_MAX),
      tag: NoteTag::Todo,
      focus: Field::Title,
      errors: PayloadErrors::default(),
      closed: false,
    }
  }

  fn submit(&mut self) {
    match CreateNotePayload::validate(self.title.value(), self.content.value(), self.tag) {
      Ok(payload) => {
        self.errors = PayloadErrors::default();
        let client = self.client.clone();
        self
          .create
          .start(async move { client.create_note(&payload).await });
      }
      Err(errors) => {
        debug!(?errors, "note draft rejected");
        self.focus = if errors.title.is_some() {
          Field::Title
        } else {
          Field::Content
        };
        self.errors = errors;
      }
    }
  }

  fn focused_input(&mut self) -> Option<&mut TextInput> {
    match self.focus {
      Field::Title => Some(&mut self.title),
      Field::Content => Some(&mut self.content),
      Field::Tag => None,
    }
  }

  fn field_line<'a>(&self, field: Field, label: &'a str, input: &'a TextInput) -> Line<'a> {
    let label_style = if self.focus == field {
      Style::default().fg(Color::Yellow).bold()
    } else {
      Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![Span::styled(format!("{:<9}", label), label_style)];
    if self.focus == field {
      let (before, after) = input.split_at_cursor();
      spans.push(Span::raw(before));
      spans.push(Span::styled("_", Style::default().fg(Color::Yellow))); // Cursor
      spans.push(Span::raw(after));
    } else {
      spans.push(Span::raw(input.value()));
    }
    Line::from(spans)
  }

  fn error_line(error: &Option<String>) -> Line<'_> {
    match error {
      Some(message) => Line::from(Span::styled(
        format!("         {}", message),
        Style::default().fg(Color::Red),
      )),
      None => Line::from(""),
    }
  }
}

impl View for NoteFormView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.submit();
      return ViewAction::None;
    }

    match key.code {
      KeyCode::Esc => return ViewAction::Pop,
      KeyCode::Tab | KeyCode::Down => {
        self.focus = self.focus.next();
        return ViewAction::None;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = self.focus.prev();
        return ViewAction::None;
      }
      _ => {}
    }

    if self.focus == Field::Tag {
      match key.code {
        KeyCode::Left | KeyCode::Char('h') => self.tag = self.tag.prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => self.tag = self.tag.next(),
        KeyCode::Enter => self.submit(),
        _ => {}
      }
      return ViewAction::None;
    }

    let focus = self.focus;
    if let Some(input) = self.focused_input() {
      if matches!(input.handle_key(key), InputResult::Submitted(_)) {
        self.focus = focus.next();
      }
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let inner = draw_modal_frame(frame, area, "New note", 60, 50);

    let tag_style = if self.focus == Field::Tag {
      Style::default().fg(Color::Yellow).bold()
    } else {
      Style::default().fg(Color::Cyan)
    };

    let mut lines = vec![
      self.field_line(Field::Title, "Title", &self.title),
      Self::error_line(&self.errors.title),
      self.field_line(Field::Content, "Content", &self.content),
      Self::error_line(&self.errors.content),
      Line::from(vec![
        Span::styled(format!("{:<9}", "Tag"), tag_style),
        Span::raw("< "),
        Span::styled(
          self.tag.as_str(),
          Style::default().fg(tag_color(self.tag.as_str())).bold(),
        ),
        Span::raw(" >"),
      ]),
      Line::from(""),
    ];

    if self.create.is_pending() {
      lines.push(Line::from(Span::styled(
        "Creating note...",
        Style::default().fg(Color::DarkGray),
      )));
    } else if let Some(error) = self.create.error() {
      lines.push(Line::from(Span::styled(
        format!("Failed to create note: {}", error),
        Style::default().fg(Color::Red),
      )));
    } else {
      lines.push(Line::from(Span::styled(
        "Tab: next field  Enter on Tag or Ctrl-S: create",
        Style::default().fg(Color::DarkGray),
      )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
  }

  fn breadcrumb_label(&self) -> String {
    "New note".to_string()
  }

  fn is_modal(&self) -> bool {
    true
  }

  fn captures_input(&self) -> bool {
    true
  }

  fn tick(&mut self) {
    if self.create.poll() && self.create.take_success().is_some() {
      self.closed = true;
    }
  }

  fn is_closed(&self) -> bool {
    self.closed
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new("tab", "next field"),
      Shortcut::new("ctrl-s", "create"),
      Shortcut::new("esc", "cancel"),
    ]
  }
}
