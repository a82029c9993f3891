pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use renderfns::{draw_footer, draw_header};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let breadcrumb = app.breadcrumb();
  let status = app.status();

  if let Some(view) = app.current_view() {
    draw_header(
      frame,
      chunks[0],
      view.service().unwrap_or_default(),
      &view.shortcuts(),
    );
  }

  // Modal views are drawn over the views below them, bottom-up
  let views = app.views_mut();
  let base = views.iter().rposition(|v| !v.is_modal()).unwrap_or(0);
  for view in views[base..].iter_mut() {
    view.render(frame, chunks[1]);
  }

  draw_footer(frame, chunks[2], &breadcrumb, status.as_deref());

  app.command_input().render_overlay(frame, chunks[1]);
  app.toast().render(frame, chunks[1]);
}

/// Keep a list selection within `len` items, selecting the first item when
/// nothing is selected yet.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    None => state.select(Some(0)),
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    Some(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_valid_selection_empty() {
    let mut state = ListState::default().with_selected(Some(3));
    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }

  #[test]
  fn test_ensure_valid_selection_selects_first() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 5);
    assert_eq!(state.selected(), Some(0));
  }

  #[test]
  fn test_ensure_valid_selection_clamps_after_shorter_page() {
    let mut state = ListState::default().with_selected(Some(11));
    ensure_valid_selection(&mut state, 4);
    assert_eq!(state.selected(), Some(3));
  }
}
