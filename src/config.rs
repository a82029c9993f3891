use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::query::{CachePolicy, CoordinatorOptions};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub notehub: NoteHubConfig,
  #[serde(default)]
  pub tmdb: TmdbConfig,
  #[serde(default)]
  pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteHubConfig {
  #[serde(default = "default_notehub_url")]
  pub base_url: String,
  /// Notes per page
  #[serde(default = "default_per_page")]
  pub per_page: u32,
}

impl Default for NoteHubConfig {
  fn default() -> Self {
    Self {
      base_url: default_notehub_url(),
      per_page: default_per_page(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbConfig {
  #[serde(default = "default_tmdb_url")]
  pub base_url: String,
  /// Prefix for poster/backdrop paths, without the size segment
  #[serde(default = "default_image_url")]
  pub image_base_url: String,
}

impl Default for TmdbConfig {
  fn default() -> Self {
    Self {
      base_url: default_tmdb_url(),
      image_base_url: default_image_url(),
    }
  }
}

/// Cache and debounce tuning shared by both list views
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
  #[serde(default = "default_stale_secs")]
  pub stale_secs: u64,
  #[serde(default = "default_gc_secs")]
  pub gc_secs: u64,
  #[serde(default = "default_max_entries")]
  pub max_entries: usize,
}

impl Default for QueryConfig {
  fn default() -> Self {
    Self {
      debounce_ms: default_debounce_ms(),
      stale_secs: default_stale_secs(),
      gc_secs: default_gc_secs(),
      max_entries: default_max_entries(),
    }
  }
}

impl QueryConfig {
  /// Coordinator options for a list with the given page size.
  pub fn coordinator_options(&self, page_size: u32, require_search: bool) -> CoordinatorOptions {
    CoordinatorOptions {
      page_size,
      debounce: Duration::from_millis(self.debounce_ms),
      require_search,
      cache: CachePolicy {
        stale_time: Duration::from_secs(self.stale_secs),
        gc_time: Duration::from_secs(self.gc_secs),
        max_entries: self.max_entries.max(1),
      },
    }
  }
}

fn default_notehub_url() -> String {
  "https://notehub-public.goit.study/api".to_string()
}

fn default_per_page() -> u32 {
  12
}

fn default_tmdb_url() -> String {
  "https://api.themoviedb.org/3".to_string()
}

fn default_image_url() -> String {
  "https://image.tmdb.org/t/p".to_string()
}

fn default_debounce_ms() -> u64 {
  500
}

fn default_stale_secs() -> u64 {
  30
}

fn default_gc_secs() -> u64 {
  300
}

fn default_max_entries() -> usize {
  50
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./noteflix.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/noteflix/config.yaml
  ///
  /// Without a config file the built-in defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("noteflix.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("noteflix").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    // An empty file deserializes to unit, not to a mapping
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(contents)
  }

  /// Get the NoteHub bearer token from environment variables.
  ///
  /// Checks NOTEFLIX_NOTEHUB_TOKEN first, then NOTEHUB_TOKEN as fallback.
  pub fn get_notehub_token() -> Result<String> {
    token_from_env(&["NOTEFLIX_NOTEHUB_TOKEN", "NOTEHUB_TOKEN"], "NoteHub")
  }

  /// Get the TMDB bearer token from environment variables.
  ///
  /// Checks NOTEFLIX_TMDB_TOKEN first, then TMDB_TOKEN as fallback.
  pub fn get_tmdb_token() -> Result<String> {
    token_from_env(&["NOTEFLIX_TMDB_TOKEN", "TMDB_TOKEN"], "TMDB")
  }
}

fn token_from_env(vars: &[&str], service: &str) -> Result<String> {
  vars
    .iter()
    .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
    .ok_or_else(|| {
      eyre!(
        "{} token not found. Set {} environment variable.",
        service,
        vars.join(" or ")
      )
    })
}
