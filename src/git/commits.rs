//! Conventional commit types and subject-line parsing.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Pattern: type(scope)!: description, with scope and `!` optional.
static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*(.*)$").expect("valid subject pattern")
});

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl CommitType {
    /// The lowercase token used as the subject prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// The parsed first line of a conventional commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalSubject {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
}

/// Parse the subject line of a commit message.
///
/// Returns `None` when the first line does not follow the
/// `type(scope)!: description` form, when the type is unknown, or when the
/// description is empty. A `BREAKING CHANGE:` footer also marks the commit
/// as breaking.
pub fn parse_subject(message: &str) -> Option<ConventionalSubject> {
    let first_line = message.lines().next().unwrap_or("").trim();
    let caps = SUBJECT_PATTERN.captures(first_line)?;

    let commit_type = caps.get(1)?.as_str().parse::<CommitType>().ok()?;
    let scope = caps.get(2).map(|m| m.as_str().to_string());
    let description = caps.get(4).map(|m| m.as_str().trim()).unwrap_or("");
    if description.is_empty() {
        return None;
    }

    let breaking_in_footer =
        message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:");

    Some(ConventionalSubject {
        commit_type,
        scope,
        breaking: caps.get(3).is_some() || breaking_in_footer,
        description: description.to_string(),
    })
}
