use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear};

/// Rectangle of `percent_x` × `percent_y` centered in `area`, with minimum
/// sizes so small terminals still show something usable.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
  let width = (area.width * percent_x / 100).max(40.min(area.width));
  let height = (area.height * percent_y / 100).max(12.min(area.height));
  Rect::new(
    area.x + (area.width - width) / 2,
    area.y + (area.height - height) / 2,
    width,
    height,
  )
}

/// Clear a centered box over `area`, draw its frame and return the inner area.
pub fn draw_modal_frame(
  frame: &mut Frame,
  area: Rect,
  title: &str,
  percent_x: u16,
  percent_y: u16,
) -> Rect {
  let modal_area = centered_rect(percent_x, percent_y, area);
  frame.render_widget(Clear, modal_area);

  let block = Block::default()
    .title(format!(" {} ", title))
    .title_alignment(Alignment::Center)
    .title_bottom(Line::from(" Esc: close ").right_aligned())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  let inner = block.inner(modal_area);
  frame.render_widget(block, modal_area);
  inner
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_centered_rect() {
    let area = Rect::new(0, 0, 100, 50);
    assert_eq!(centered_rect(60, 50, area), Rect::new(20, 12, 60, 25));
  }

  #[test]
  fn test_centered_rect_minimums_fit_small_area() {
    let area = Rect::new(0, 0, 30, 10);
    let rect = centered_rect(50, 50, area);
    assert_eq!(rect, Rect::new(0, 0, 30, 10));
  }
}
