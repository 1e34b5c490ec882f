//! Session settings and git binary resolution.
//!
//! Settings are built once from CLI flags and the environment, changed only
//! through the `config` command, and never written anywhere.

use std::env;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::commit::{MessageStyle, SUGGESTION_CAP};
use crate::error::{CommitError, GitError};

/// Environment variable that points at the git binary.
pub const GIT_ENV_VAR: &str = "STAGEHINT_GIT";

/// Suggestions shown unless configured otherwise.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Runtime configuration for one session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub git_binary: PathBuf,
    /// Directory every git command runs in.
    pub workdir: PathBuf,
    pub style: MessageStyle,
    pub max_suggestions: usize,
}

impl Settings {
    pub fn new(git_binary: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            git_binary: git_binary.into(),
            workdir: workdir.into(),
            style: MessageStyle::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Change a setting from `config <key> <value>`.
    ///
    /// On error the settings are left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CommitError> {
        let invalid = |reason: String| CommitError::InvalidSetting {
            key: key.to_string(),
            reason,
        };

        match key.to_lowercase().as_str() {
            "style" => {
                self.style = value.parse::<MessageStyle>().map_err(invalid)?;
            }
            "max" | "max-suggestions" => {
                self.max_suggestions = parse_max_suggestions(value).map_err(invalid)?;
            }
            _ => return Err(invalid("unknown setting (expected 'style' or 'max')".to_string())),
        }

        debug!("Setting '{}' changed to '{}'", key, value);
        Ok(())
    }

    /// Multi-line listing for the `config` command.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "  git      {}", self.git_binary.display());
        let _ = writeln!(out, "  workdir  {}", self.workdir.display());
        let _ = writeln!(out, "  style    {}", self.style);
        let _ = write!(out, "  max      {} (1-{})", self.max_suggestions, SUGGESTION_CAP);
        out
    }
}

/// Parse a suggestion limit, accepting only `1..=SUGGESTION_CAP`.
pub fn parse_max_suggestions(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if (1..=SUGGESTION_CAP).contains(&n) => Ok(n),
        _ => Err(format!("expected a number from 1 to {}, got '{}'", SUGGESTION_CAP, value)),
    }
}

/// Locate the git binary.
///
/// Order: explicit path, then `STAGEHINT_GIT`, then `git` on the PATH
/// (via the `which` crate, so this also works on Windows).
pub fn resolve_git_binary(explicit: Option<&Path>) -> Result<PathBuf, GitError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = git_from_env() {
        return Ok(path);
    }

    which::which("git").map_err(|_| GitError::NotInstalled)
}

/// Read the git path from the environment, ignoring empty values.
fn git_from_env() -> Option<PathBuf> {
    match env::var(GIT_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        Ok(_) => {
            warn!("{} is set but empty, ignoring it", GIT_ENV_VAR);
            None
        }
        Err(_) => None,
    }
}
