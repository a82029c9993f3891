use crate::config::Config;
use crate::query::{QueryCoordinator, QueryEvent};
use crate::tmdb::{self, Movie, TmdbClient};
use crate::ui::components::{draw_pagination, KeyResult, SearchEvent, SearchInput, Toast, ToastKind};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{rating_color, truncate};
use crate::ui::view::{Shortcut, View, ViewAction};
use crate::ui::views::MovieDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::time::Instant;
use tokio::sync::mpsc;

const NO_RESULTS: &str = "No movies found for your request.";
const FETCH_ERROR: &str = "There was an error, please try again...";

/// TMDB movie search. Nothing is fetched until a title is typed.
pub struct MoviesView {
  client: TmdbClient,
  movies: QueryCoordinator<Movie>,
  events: mpsc::UnboundedReceiver<QueryEvent>,
  search: SearchInput,
  list_state: ListState,
  toast: Toast,
}

impl MoviesView {
  pub fn new(client: TmdbClient, config: &Config) -> Self {
    let options = config.query.coordinator_options(tmdb::PAGE_SIZE, true);

    let fetch_client = client.clone();
    let mut movies = QueryCoordinator::new(options, move |query| {
      let client = fetch_client.clone();
      async move { client.search_movies(&query).await }
    });
    let events = movies.subscribe();

    let mut search = SearchInput::new();
    search.activate();

    Self {
      client,
      movies,
      events,
      search,
      list_state: ListState::default(),
      toast: Toast::new(),
    }
  }

  fn items(&self) -> &[Movie] {
    self
      .movies
      .displayed()
      .map(|page| page.items.as_slice())
      .unwrap_or(&[])
  }

  fn show_pagination(&self) -> bool {
    self.movies.total_pages().is_some_and(|total| total > 1)
  }

  /// Toast once per settled search that comes back empty
  fn drain_events(&mut self) {
    while let Ok(event) = self.events.try_recv() {
      if let QueryEvent::Fetched {
        active: true,
        items: 0,
        ..
      } = event
      {
        self.toast.show(NO_RESULTS, ToastKind::Info);
      }
    }
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let len = self.items().len();
    ensure_valid_selection(&mut self.list_state, len);

    let title = if self.movies.is_settling() {
      " Movies (searching...) ".to_string()
    } else if self.movies.is_fetching() {
      " Movies (loading...) ".to_string()
    } else {
      " Movies ".to_string()
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    // Errors replace the list, even when the query kept older data
    let empty = self.movies.displayed().map_or(true, |page| page.is_empty());
    if empty || self.movies.is_error() {
      let (content, color) = if self.movies.is_error() {
        (FETCH_ERROR, Color::Red)
      } else if self.movies.is_loading() {
        ("Loading movies...", Color::DarkGray)
      } else if !self.movies.is_enabled() {
        ("Type a title to search movies.", Color::DarkGray)
      } else {
        ("", Color::DarkGray)
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(color));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = self
      .items()
      .iter()
      .map(|movie| {
        let year = movie
          .release_year()
          .map(|y| y.to_string())
          .unwrap_or_else(|| "----".to_string());
        let line = Line::from(vec![
          Span::styled(format!("{:<6}", year), Style::default().fg(Color::Cyan)),
          Span::styled(
            format!("{:<8}", movie.rating()),
            Style::default().fg(rating_color(movie.vote_average)),
          ),
          Span::raw(" "),
          Span::styled(
            format!("{:<40}", truncate(&movie.title, 40)),
            Style::default().fg(Color::White).bold(),
          ),
          Span::raw(" "),
          Span::styled(
            truncate(&movie.overview, 60),
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

impl View for MoviesView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(text)) => {
        self.movies.set_search_text(text);
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
        if self.movies.next_page() {
          self.list_state.select(Some(0));
        }
      }
      KeyCode::Char('[') | KeyCode::Left => {
        if self.movies.prev_page() {
          self.list_state.select(Some(0));
        }
      }
      KeyCode::Char('r') => {
        self.movies.refetch();
      }
      KeyCode::Enter => {
        if let Some(movie) = self
          .list_state
          .selected()
          .and_then(|idx| self.items().get(idx))
        {
          return ViewAction::Push(Box::new(MovieDetailView::new(
            movie.clone(),
            self.client.image_base_url().to_string(),
          )));
        }
      }
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
      .render(frame, chunks[0], "Press / to search movies");
    self.render_list(frame, chunks[1]);

    if let Some(total) = self.movies.total_pages().filter(|&total| total > 1) {
      draw_pagination(frame, chunks[2], self.movies.page(), total);
    }

    self.toast.render(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    let search = self.movies.search_text();
    if search.is_empty() {
      "Movies".to_string()
    } else {
      format!("Movies [{}] (page {})", search, self.movies.page())
    }
  }

  fn service(&self) -> Option<&str> {
    Some(self.client.host())
  }

  fn captures_input(&self) -> bool {
    self.search.is_active()
  }

  fn tick(&mut self) {
    self.movies.poll();
    self.drain_events();
    self.toast.tick(Instant::now());
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new(":", "command"),
      Shortcut::new("/", "search"),
      Shortcut::new("enter", "details"),
      Shortcut::new("[ ]", "page"),
      Shortcut::new("q", "back"),
    ]
  }
}
