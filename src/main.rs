mod app;
mod commands;
mod config;
mod event;
mod http;
mod logging;
mod notehub;
mod query;
mod tmdb;
mod ui;

use app::Section;
use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "noteflix")]
#[command(about = "A terminal UI for NoteHub notes and TMDB movie search")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/noteflix/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// View to open at startup
  #[arg(short, long, value_enum, default_value_t = Section::Notes)]
  view: Section,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Logs go to a file; the terminal belongs to the UI
  let _guard = logging::init()?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  // Initialize and run the app
  let mut app = app::App::new(config, args.view)?;
  app.run().await?;

  Ok(())
}
