//! Suggested commit messages and checks on user-written ones.

use std::fmt;

use serde::Serialize;

use crate::git::{CommitType, ConventionalSubject, parse_subject};

/// Subject lines longer than this get a note before committing.
pub const SUBJECT_SOFT_LIMIT: usize = 72;

/// How a suggestion is rendered into a commit subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    /// `type: description`
    #[default]
    Conventional,
    /// Capitalized description without the type prefix.
    Plain,
}

impl MessageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conventional => "conventional",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for MessageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conventional" | "conv" => Ok(Self::Conventional),
            "plain" | "simple" => Ok(Self::Plain),
            _ => Err(format!("expected 'conventional' or 'plain', got '{}'", s)),
        }
    }
}

/// A proposed commit message: a category plus a short description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub category: CommitType,
    pub description: String,
}

impl Suggestion {
    pub fn new(category: CommitType, description: impl Into<String>) -> Self {
        Self {
            category,
            description: description.into(),
        }
    }

    /// Render the suggestion as a commit subject in the given style.
    pub fn render(&self, style: MessageStyle) -> String {
        match style {
            MessageStyle::Conventional => format!("{}: {}", self.category, self.description),
            MessageStyle::Plain => capitalize(&self.description),
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.description)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// What we noticed about a message the user typed themselves.
#[derive(Debug, Clone)]
pub struct MessageReview {
    pub conventional: Option<ConventionalSubject>,
    pub subject_len: usize,
}

impl MessageReview {
    /// Human-readable notes; empty when nothing stands out.
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.conventional.is_none() {
            notes.push("Message does not follow the conventional `type: description` form".to_string());
        }
        if self.subject_len > SUBJECT_SOFT_LIMIT {
            notes.push(format!(
                "Subject line is {} characters (recommended at most {})",
                self.subject_len, SUBJECT_SOFT_LIMIT
            ));
        }
        notes
    }
}

/// Inspect a user-written commit message. Never rejects it.
pub fn review_message(message: &str) -> MessageReview {
    let subject = message.lines().next().unwrap_or("").trim();
    MessageReview {
        conventional: parse_subject(message),
        subject_len: subject.chars().count(),
    }
}
