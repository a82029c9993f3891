use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Info,
  Error,
}

/// Short-lived notification in the bottom-right corner
#[derive(Debug, Clone, Default)]
pub struct Toast {
  current: Option<(String, ToastKind, Instant)>,
}

impl Toast {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
    self.current = Some((message.into(), kind, Instant::now()));
  }

  /// Expire the toast once its time is up. Returns true if it was removed.
  pub fn tick(&mut self, now: Instant) -> bool {
    let expired = self
      .current
      .as_ref()
      .is_some_and(|(_, _, shown)| now.duration_since(*shown) >= TOAST_TTL);
    if expired {
      self.current = None;
    }
    expired
  }

  pub fn render(&self, frame: &mut Frame, area: Rect) {
    let Some((message, kind, _)) = &self.current else {
      return;
    };

    let color = match kind {
      ToastKind::Info => Color::Cyan,
      ToastKind::Error => Color::Red,
    };

    let width = (message.chars().count() as u16 + 4).min(area.width);
    let height = 3.min(area.height);
    let toast_area = Rect::new(
      area.x + area.width.saturating_sub(width + 1),
      area.y + area.height.saturating_sub(height + 1),
      width,
      height,
    );

    frame.render_widget(Clear, toast_area);
    let paragraph = Paragraph::new(message.as_str())
      .style(Style::default().fg(color))
      .block(
        Block::default()
          .borders(Borders::ALL)
          .border_style(Style::default().fg(color)),
      );
    frame.render_widget(paragraph, toast_area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_toast_expires() {
    let mut toast = Toast::new();
    toast.show("No movies found for your request.", ToastKind::Info);
    let shown = Instant::now();

    assert!(!toast.tick(shown));
    assert!(toast.tick(shown + TOAST_TTL));
    // Already gone
    assert!(!toast.tick(shown + TOAST_TTL));
  }
}
