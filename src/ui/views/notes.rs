use crate::config::Config;
use crate::notehub::{Note, NoteHubClient};
use crate::query::{Mutation, MutationState, QueryCoordinator};
use crate::ui::components::{draw_pagination, KeyResult, SearchEvent, SearchInput};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{first_line, tag_color, truncate};
use crate::ui::view::{Shortcut, View, ViewAction};
use crate::ui::views::NoteFormView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use tracing::warn;

/// Paged, searchable list of NoteHub notes
pub struct NotesView {
  client: NoteHubClient,
  notes: QueryCoordinator<Note>,
  delete: Mutation<Note>,
  search: SearchInput,
  list_state: ListState,
}

impl NotesView {
  pub fn new(client: NoteHubClient, config: &Config) -> Self {
    let options = config
      .query
      .coordinator_options(config.notehub.per_page, false);

    let fetch_client = client.clone();
    let mut notes = QueryCoordinator::new(options, move |query| {
      let client = fetch_client.clone();
      async move { client.fetch_notes(&query).await }
    });
    let delete = Mutation::new().bind(notes.invalidation_handle());

    // Notes list even without a search
    notes.refresh();

    Self {
      client,
      notes,
      delete,
      search: SearchInput::new(),
      list_state: ListState::default(),
    }
  }

  fn items(&self) -> &[Note] {
    self
      .notes
      .displayed()
      .map(|page| page.items.as_slice())
      .unwrap_or(&[])
  }

  fn selected_note(&self) -> Option<&Note> {
    self
      .list_state
      .selected()
      .and_then(|idx| self.items().get(idx))
  }

  fn delete_selected(&mut self) {
    let Some(id) = self.selected_note().map(|note| note.id.clone()) else {
      return;
    };
    let client = self.client.clone();
    self
      .delete
      .start(async move { client.delete_note(&id).await });
  }

  fn show_pagination(&self) -> bool {
    !self.notes.is_loading() && self.notes.total_pages().is_some_and(|total| total > 1)
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let len = self.items().len();
    ensure_valid_selection(&mut self.list_state, len);

    let mut title = String::from(" Notes ");
    if self.notes.is_settling() {
      title.push_str("(searching...) ");
    } else if self.notes.is_fetching() {
      title.push_str("(loading...) ");
    } else if self.notes.is_placeholder() {
      title.push_str("(updating...) ");
    }
    if self.notes.is_error() && len > 0 {
      title.push_str("(error) ");
    }
    if self.delete.is_pending() {
      title.push_str("(deleting...) ");
    }

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if len == 0 {
      let content = if self.notes.is_loading() {
        "Loading..."
      } else if self.notes.is_error() {
        "Error loading notes."
      } else {
        "No notes found."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = self
      .items()
      .iter()
      .map(|note| {
        let line = Line::from(vec![
          Span::styled(
            format!("{:<10}", note.tag),
            Style::default().fg(tag_color(&note.tag)),
          ),
          Span::raw(" "),
          Span::styled(
            format!("{:<30}", truncate(&note.title, 30)),
            Style::default().fg(Color::White).bold(),
          ),
          Span::raw(" "),
          Span::styled(
            truncate(first_line(&note.content), 60),
            Style::default().fg(Color::DarkGray),
          ),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl View for NotesView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    // Let search component try to handle first
    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(text)) => {
        self.notes.set_search_text(text);
        return ViewAction::None;
      }
      KeyResult::Event(SearchEvent::Submitted) | KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
      }
      KeyCode::Char(']') | KeyCode::Right => {
        if self.notes.next_page() {
          self.list_state.select(Some(0));
        }
      }
      KeyCode::Char('[') | KeyCode::Left => {
        if self.notes.prev_page() {
          self.list_state.select(Some(0));
        }
      }
      KeyCode::Char('r') => {
        self.notes.refetch();
      }
      KeyCode::Char('n') => {
        return ViewAction::Push(Box::new(NoteFormView::new(
          self.client.clone(),
          self.notes.invalidation_handle(),
        )));
      }
      KeyCode::Char('d') => self.delete_selected(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let pagination_height = if self.show_pagination() { 1 } else { 0 };
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(pagination_height),
      ])
      .split(area);

    self
      .search
      .render(frame, chunks[0], "Press / to search notes");
    self.render_list(frame, chunks[1]);

    if let Some(total) = self.notes.total_pages().filter(|_| self.show_pagination()) {
      draw_pagination(frame, chunks[2], self.notes.page(), total);
    }
  }

  fn breadcrumb_label(&self) -> String {
    let search = self.notes.search_text();
    if search.is_empty() {
      format!("Notes (page {})", self.notes.page())
    } else {
      format!("Notes [{}] (page {})", search, self.notes.page())
    }
  }

  fn service(&self) -> Option<&str> {
    Some(self.client.host())
  }

  fn captures_input(&self) -> bool {
    self.search.is_active()
  }

  fn tick(&mut self) {
    self.notes.poll();
    if self.delete.poll() {
      match self.delete.state() {
        MutationState::Error(e) => warn!(error = %e, "delete failed"),
        MutationState::Success(_) => self.delete.reset(),
        _ => {}
      }
    }
  }

  fn status(&self) -> Option<String> {
    self
      .delete
      .error()
      .map(|e| format!("Delete failed: {}", e))
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new(":", "command"),
      Shortcut::new("/", "search"),
      Shortcut::new("n", "new"),
      Shortcut::new("d", "delete"),
      Shortcut::new("[ ]", "page"),
      Shortcut::new("r", "refresh"),
      Shortcut::new("q", "back"),
    ]
  }
}
