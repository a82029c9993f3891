use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::collections::BTreeSet;

/// Page numbers shown around the current page
const PAGE_RANGE: u32 = 5;
/// Page numbers always shown at each end
const MARGIN_PAGES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
  Page(u32),
  Ellipsis,
}

/// Compute the page controls for `current` of `total` pages.
///
/// A gap of a single page shows that page instead of an ellipsis.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
  if total == 0 {
    return Vec::new();
  }
  let current = current.clamp(1, total);

  if total <= PAGE_RANGE + 2 * MARGIN_PAGES {
    return (1..=total).map(PageItem::Page).collect();
  }

  let mut start = current.saturating_sub(PAGE_RANGE / 2).max(1);
  let mut end = start + PAGE_RANGE - 1;
  if end > total {
    end = total;
    start = total - PAGE_RANGE + 1;
  }

  let pages: BTreeSet<u32> = (1..=MARGIN_PAGES)
    .chain(start..=end)
    .chain(total - MARGIN_PAGES + 1..=total)
    .collect();

  let mut items = Vec::new();
  let mut last = 0;
  for page in pages {
    match page - last {
      1 => {}
      2 => items.push(PageItem::Page(last + 1)),
      _ => items.push(PageItem::Ellipsis),
    }
    items.push(PageItem::Page(page));
    last = page;
  }
  items
}

/// Draw `‹ 1 … 4 [5] 6 … 10 ›` style controls, centered in `area`.
pub fn draw_pagination(frame: &mut Frame, area: Rect, current: u32, total: u32) {
  let active = Style::default().fg(Color::Cyan);
  let dim = Style::default().fg(Color::DarkGray);

  let mut spans = vec![Span::styled("‹ ", if current > 1 { active } else { dim })];
  for item in page_window(current, total) {
    match item {
      PageItem::Page(page) if page == current => spans.push(Span::styled(
        format!("[{}] ", page),
        Style::default().fg(Color::Yellow).bold(),
      )),
      PageItem::Page(page) => spans.push(Span::raw(format!("{} ", page))),
      PageItem::Ellipsis => spans.push(Span::styled("… ", dim)),
    }
  }
  spans.push(Span::styled("›", if current < total { active } else { dim }));

  let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
  frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use PageItem::{Ellipsis, Page};

  #[test]
  fn test_few_pages_shows_all() {
    assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
    assert_eq!(page_window(1, 7).len(), 7);
    assert!(page_window(1, 0).is_empty());
  }

  #[test]
  fn test_window_at_start() {
    assert_eq!(
      page_window(1, 10),
      vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
    );
  }

  #[test]
  fn test_window_in_middle() {
    assert_eq!(
      page_window(6, 20),
      vec![
        Page(1),
        Ellipsis,
        Page(4),
        Page(5),
        Page(6),
        Page(7),
        Page(8),
        Ellipsis,
        Page(20)
      ]
    );
  }

  #[test]
  fn test_single_page_gap_is_filled() {
    assert_eq!(
      page_window(5, 10),
      vec![
        Page(1),
        Page(2),
        Page(3),
        Page(4),
        Page(5),
        Page(6),
        Page(7),
        Ellipsis,
        Page(10)
      ]
    );
  }

  #[test]
  fn test_window_at_end() {
    assert_eq!(
      page_window(10, 10),
      vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
    );
  }

  #[test]
  fn test_current_is_clamped() {
    assert_eq!(page_window(99, 3), vec![Page(1), Page(2), Page(3)]);
  }
}
