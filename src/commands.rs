/// Available commands and autocomplete logic

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "notes",
    aliases: &["n", "note", "notehub"],
    description: "Browse and edit NoteHub notes",
  },
  Command {
    name: "movies",
    aliases: &["m", "movie", "tmdb"],
    description: "Search TMDB movies",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit noteflix",
  },
];

/// Get autocomplete suggestions for a given input
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.trim().to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = COMMANDS
    .iter()
    .filter_map(|cmd| match_rank(cmd, &input_lower).map(|rank| (cmd, rank)))
    .collect();

  // Stable sort keeps declaration order within a rank
  matches.sort_by_key(|(_, rank)| *rank);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Lower is better; `None` means no match
fn match_rank(cmd: &Command, input: &str) -> Option<u32> {
  if cmd.name == input {
    Some(0)
  } else if cmd.aliases.contains(&input) {
    Some(1)
  } else if cmd.name.starts_with(input) {
    Some(2)
  } else if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(3)
  } else if cmd.name.contains(input) {
    Some(4)
  } else if cmd.aliases.iter().any(|a| a.contains(input)) {
    Some(5)
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    let suggestions = get_suggestions("");
    assert_eq!(suggestions.len(), COMMANDS.len());
  }

  #[test]
  fn test_exact_match() {
    let suggestions = get_suggestions("movies");
    assert_eq!(suggestions[0].name, "movies");
  }

  #[test]
  fn test_alias_match() {
    assert_eq!(get_suggestions("n")[0].name, "notes");
    assert_eq!(get_suggestions("tmdb")[0].name, "movies");
  }

  #[test]
  fn test_prefix_match() {
    let suggestions = get_suggestions("mov");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].name, "movies");
  }

  #[test]
  fn test_fuzzy_match() {
    let suggestions = get_suggestions("ote");
    assert_eq!(suggestions[0].name, "notes");
  }

  #[test]
  fn test_no_match() {
    assert!(get_suggestions("boards").is_empty());
  }
}
