use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone)]
pub struct Shortcut {
  pub key: &'static str,
  pub label: &'static str,
}

impl Shortcut {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self { key, label }
  }
}

/// Actions that a view can request in response to user input
pub enum ViewAction {
  /// No action needed
  None,
  /// Push a new view onto the stack
  Push(Box<dyn View>),
  /// Pop current view from stack (go back)
  Pop,
}

/// Trait for view behavior
///
/// Views handle their own input modes (search, forms) and return actions
/// for the App to execute: App → View → Components.
///
/// Views that load data asynchronously own a `QueryCoordinator` or
/// `Mutation` and poll it in [`tick`](View::tick).
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Get the breadcrumb label for this view
  fn breadcrumb_label(&self) -> String;

  /// Host of the service this view talks to (for header display)
  fn service(&self) -> Option<&str> {
    None
  }

  /// Modal views are drawn over the view below them
  fn is_modal(&self) -> bool {
    false
  }

  /// Whether the view is taking text input, so global keys (`:`, `q`)
  /// must be passed through
  fn captures_input(&self) -> bool {
    false
  }

  /// Called on each tick, for every view on the stack
  fn tick(&mut self) {}

  /// Set once the view has finished on its own (e.g. a submitted form);
  /// App pops it after the tick
  fn is_closed(&self) -> bool {
    false
  }

  /// Persistent status message for the footer (e.g. a failed write)
  fn status(&self) -> Option<String> {
    None
  }

  /// Keyboard shortcuts to display in the header
  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new(":", "command"),
      Shortcut::new("/", "search"),
      Shortcut::new("q", "back"),
    ]
  }
}
