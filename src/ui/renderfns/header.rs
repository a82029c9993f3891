use crate::ui::view::Shortcut;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with logo, service host, and the view's shortcuts
pub fn draw_header(frame: &mut Frame, area: Rect, service: &str, shortcuts: &[Shortcut]) {
  let mut spans = vec![
    Span::styled(" noteflix ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
  ];

  if !service.is_empty() {
    spans.push(Span::styled(
      format!(" {} ", service),
      Style::default().fg(Color::White),
    ));
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
  }

  // Shortcuts - keys highlighted, descriptions dimmed
  for shortcut in shortcuts {
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
      format!("<{}>", shortcut.key),
      Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
      format!(" {}", shortcut.label),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}
