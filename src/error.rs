//! Error types for stagehint modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found. Install git or pass --git <PATH> (or set STAGEHINT_GIT)")]
    NotInstalled,

    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} failed: {output}")]
    CommandFailed { operation: String, output: String },
}

/// Errors from suggestion and commit operations.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No staged changes. Stage files with `git add <path>` first.")]
    NoStagedChanges,

    #[error("Invalid value for '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Errors surfaced by a single session command.
///
/// None of these end the session; the loop prints them and re-prompts.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error("Failed to read input: {0}")]
    Prompt(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
