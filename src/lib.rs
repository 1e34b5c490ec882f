//! stagehint - A CLI tool that suggests commit messages from staged changes.
//!
//! # Overview
//!
//! stagehint reads the staged diff from git, runs a fixed battery of
//! heuristics over its text and file list, and proposes short conventional
//! commit messages. The interactive session can also perform the commit
//! after confirmation.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod session;

// Re-export commonly used types
pub use commit::{Analysis, DiffSummary, MessageStyle, SUGGESTION_CAP, Suggestion, parse_diff, suggest};
pub use config::Settings;
pub use error::{CommitError, GitError, SessionError};
pub use git::{CommitType, GitCli, Vcs};
pub use session::{Session, load_staged};
