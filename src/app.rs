use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::notehub::NoteHubClient;
use crate::tmdb::TmdbClient;
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult, Toast, ToastKind};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{MoviesView, NotesView};
use clap::ValueEnum;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::{error, info};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Root views reachable with `:` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
  Notes,
  Movies,
}

impl Section {
  /// Section for a resolved command name
  pub fn from_command(name: &str) -> Option<Self> {
    match name {
      "notes" => Some(Section::Notes),
      "movies" => Some(Section::Movies),
      _ => None,
    }
  }
}

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// `:` command prompt
  command_input: CommandInput,

  /// App-wide notifications (failed commands)
  toast: Toast,

  config: Config,

  should_quit: bool,
}

impl App {
  pub fn new(config: Config, section: Section) -> Result<Self> {
    let root = open_section(section, &config)?;
    info!(?section, "starting");

    Ok(Self {
      view_stack: vec![root],
      command_input: CommandInput::new(),
      toast: Toast::new(),
      config,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = self.run_loop().await;

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn run_loop(&mut self) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut events = EventHandler::new(TICK_RATE);

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key),
        Some(Event::Resize) | Some(Event::Tick) => {}
        None => break,
      }
      self.tick();
    }

    Ok(())
  }

  /// Poll every view on the stack, so background views keep their
  /// caches current, then drop views that finished on their own.
  fn tick(&mut self) {
    for view in self.view_stack.iter_mut() {
      view.tick();
    }
    while self.view_stack.len() > 1 && self.view_stack.last().is_some_and(|v| v.is_closed()) {
      self.view_stack.pop();
    }
    self.toast.tick(Instant::now());
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    match self.command_input.handle_key(key) {
      KeyResult::Event(CommandEvent::Submitted(cmd)) => {
        self.execute_command(&cmd);
        return;
      }
      KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    let captures_input = self
      .current_view()
      .is_some_and(|view| view.captures_input());
    if key.code == KeyCode::Char(':') && !captures_input {
      self.command_input.activate();
      return;
    }

    let action = match self.view_stack.last_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::None,
    };
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => self.view_stack.push(view),
      ViewAction::Pop => {
        self.view_stack.pop();
        // Leaving the root view quits
        if self.view_stack.is_empty() {
          self.should_quit = true;
        }
      }
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    if cmd.is_empty() {
      return;
    }
    if cmd == "quit" {
      self.should_quit = true;
      return;
    }

    let Some(section) = Section::from_command(cmd) else {
      self
        .toast
        .show(format!("Unknown command: {}", cmd), ToastKind::Error);
      return;
    };

    match open_section(section, &self.config) {
      Ok(view) => {
        info!(?section, "switching view");
        // Replace the whole stack
        self.view_stack = vec![view];
      }
      Err(e) => {
        error!(?section, error = %e, "failed to open view");
        self.toast.show(e.to_string(), ToastKind::Error);
      }
    }
  }

  pub fn current_view(&self) -> Option<&dyn View> {
    self.view_stack.last().map(|v| v.as_ref())
  }

  pub fn views_mut(&mut self) -> &mut [Box<dyn View>] {
    &mut self.view_stack
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|view| view.breadcrumb_label())
      .collect()
  }

  /// Footer status of the topmost view that has one
  pub fn status(&self) -> Option<String> {
    self.view_stack.iter().rev().find_map(|view| view.status())
  }

  pub fn command_input(&self) -> &CommandInput {
    &self.command_input
  }

  pub fn toast(&self) -> &Toast {
    &self.toast
  }
}

fn open_section(section: Section, config: &Config) -> Result<Box<dyn View>> {
  let view: Box<dyn View> = match section {
    Section::Notes => Box::new(NotesView::new(NoteHubClient::new(&config.notehub)?, config)),
    Section::Movies => Box::new(MoviesView::new(TmdbClient::new(&config.tmdb)?, config)),
  };
  Ok(view)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_section_from_command() {
    assert_eq!(Section::from_command("notes"), Some(Section::Notes));
    assert_eq!(Section::from_command("movies"), Some(Section::Movies));
    assert_eq!(Section::from_command("quit"), None);
  }

  #[test]
  fn test_section_value_enum() {
    assert_eq!(Section::from_str("movies", true), Ok(Section::Movies));
  }
}
