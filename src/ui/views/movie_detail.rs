use crate::tmdb::Movie;
use crate::ui::components::draw_modal_frame;
use crate::ui::renderfns::rating_color;
use crate::ui::view::{Shortcut, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Modal with the details of one movie
pub struct MovieDetailView {
  movie: Movie,
  image_base_url: String,
  scroll: u16,
}

impl MovieDetailView {
  pub fn new(movie: Movie, image_base_url: String) -> Self {
    Self {
      movie,
      image_base_url,
      scroll: 0,
    }
  }

  fn labeled<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
      Span::styled(format!("{:<14}", label), Style::default().fg(Color::Cyan)),
      Span::styled(value, Style::default().fg(color)),
    ])
  }
}

impl View for MovieDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
      KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let inner = draw_modal_frame(frame, area, &self.movie.title, 70, 70);

    let release = if self.movie.release_date.is_empty() {
      "Unknown".to_string()
    } else {
      self.movie.release_date.clone()
    };
    let poster = self
      .movie
      .poster_url(&self.image_base_url)
      .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
      Line::from(Span::styled(
        self.movie.title.clone(),
        Style::default().fg(Color::White).bold(),
      )),
      Line::from(""),
      Self::labeled("Release date", release, Color::White),
      Self::labeled(
        "Rating",
        self.movie.rating(),
        rating_color(self.movie.vote_average),
      ),
      Self::labeled(
        "Backdrop",
        self.movie.backdrop_url(&self.image_base_url),
        Color::DarkGray,
      ),
      Self::labeled("Poster", poster, Color::DarkGray),
      Line::from(""),
    ];

    if self.movie.overview.is_empty() {
      lines.push(Line::from(Span::styled(
        "No overview available.",
        Style::default().fg(Color::DarkGray),
      )));
    } else {
      lines.extend(self.movie.overview.lines().map(Line::from));
    }

    let paragraph = Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));
    frame.render_widget(paragraph, inner);
  }

  fn breadcrumb_label(&self) -> String {
    self.movie.title.clone()
  }

  fn is_modal(&self) -> bool {
    true
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new("j/k", "scroll"),
      Shortcut::new("esc", "close"),
    ]
  }
}
