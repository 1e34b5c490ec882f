//! Keyword parsing for the interactive command line.

/// What `config` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Set { key: String, value: String },
    /// A key without a value, or too many words.
    Usage,
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Suggest,
    Auto,
    Analyze,
    Config(ConfigAction),
    Help,
    Quit,
    /// Blank line.
    Empty,
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  suggest (s)              Suggest commit messages for staged changes
  auto    (a, commit)      Pick a suggestion, confirm, and commit
  analyze (an, stats)      Summarize the staged changes
  config  (c, cfg)         Show settings
  config <key> <value>     Change a setting (style: conventional|plain, max: 1-5)
  help    (h, ?)           Show this help
  quit    (q, exit)        Leave";

/// Parse a line by exact, case-insensitive keyword match.
///
/// Only `config` takes arguments; any other keyword followed by extra words
/// is unknown.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    if matches!(keyword.as_str(), "config" | "c" | "cfg") {
        return Command::Config(match args.as_slice() {
            [] => ConfigAction::Show,
            [key, value] => ConfigAction::Set {
                key: key.to_string(),
                value: value.to_string(),
            },
            _ => ConfigAction::Usage,
        });
    }

    if !args.is_empty() {
        return Command::Unknown(line.to_string());
    }

    match keyword.as_str() {
        "suggest" | "s" => Command::Suggest,
        "auto" | "a" | "commit" => Command::Auto,
        "analyze" | "an" | "stats" => Command::Analyze,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}
