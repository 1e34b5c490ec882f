//! Version-control adapter.
//!
//! All operations use `std::process::Command` to shell out to the git binary
//! with a fixed argument list. The user's git config is inherited except
//! where it would change the output format the parser depends on.
//! Calls block until git exits; there is no timeout.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Arguments for reading the staged diff. `-M` reports renames as such.
///
/// Header prefixes and path quoting are pinned so `diff.noprefix`,
/// `diff.mnemonicPrefix` and `core.quotepath` in the user's config cannot
/// change the `a/<old> b/<new>` header shape the parser reads.
const STAGED_DIFF_ARGS: &[&str] = &[
    "-c",
    "core.quotepath=false",
    "diff",
    "--cached",
    "--no-color",
    "--no-ext-diff",
    "-M",
    "--src-prefix=a/",
    "--dst-prefix=b/",
];

/// Repository operations the session depends on.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Whether the working directory is inside a git work tree.
    fn is_repository(&self) -> bool;

    /// Raw text of the staged diff. Empty when nothing is staged.
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Commit the staged changes, returning git's combined output.
    fn commit(&self, message: &str) -> Result<String, GitError>;
}

/// Captured result of one git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Stdout followed by stderr, as a terminal would show them.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }

    /// A run failed if git exited non-zero or reported an error line.
    pub fn failed(&self) -> bool {
        !self.success || reports_failure(&self.combined())
    }
}

/// Whether git output contains an `error:` or `fatal:` line.
///
/// Only line prefixes count; diff content lines always begin with a marker
/// character, so a changed line mentioning "error" never matches.
pub fn reports_failure(output: &str) -> bool {
    output
        .lines()
        .any(|line| line.starts_with("error:") || line.starts_with("fatal:"))
}

/// [`Vcs`] backed by the git command-line binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(binary: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            workdir: workdir.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git with `args` in the working directory and capture its output.
    ///
    /// Only spawn failures are errors here; callers decide what a non-zero
    /// exit means.
    pub fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    GitError::NotInstalled
                } else {
                    GitError::SpawnFailed(e)
                }
            })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run git and turn a failed run into [`GitError::CommandFailed`].
    fn run_checked(&self, args: &[&str], operation: &str) -> Result<GitOutput, GitError> {
        let output = self.run(args)?;
        if output.failed() {
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                output: output.combined().trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Vcs for GitCli {
    fn is_repository(&self) -> bool {
        match self.run(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(output) => output.success && output.stdout.trim() == "true",
            Err(e) => {
                debug!("Repository check could not run git: {}", e);
                false
            }
        }
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        let output = self.run_checked(STAGED_DIFF_ARGS, "diff")?;
        Ok(output.stdout)
    }

    fn commit(&self, message: &str) -> Result<String, GitError> {
        let output = self.run_checked(&["commit", "-m", message], "commit")?;
        Ok(output.combined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(success: bool, stdout: &str, stderr: &str) -> GitOutput {
        GitOutput {
            success,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_reports_failure_on_fatal_line() {
        assert!(reports_failure("fatal: not a git repository (or any of the parent directories): .git"));
        assert!(reports_failure("hint: something\nerror: pathspec 'x' did not match"));
    }

    #[test]
    fn test_reports_failure_ignores_diff_content() {
        let diff = "diff --git a/src/lib.rs b/src/lib.rs\n+// error: handled below\n-fatal: old\n";
        assert!(!reports_failure(diff));
    }

    #[test]
    fn test_combined_joins_streams() {
        let out = output(true, "[main abc123] feat: x", "warning: LF will be replaced");
        assert_eq!(out.combined(), "[main abc123] feat: x\nwarning: LF will be replaced");
    }

    #[test]
    fn test_failed_on_nonzero_exit() {
        assert!(output(false, "nothing to commit, working tree clean\n", "").failed());
    }

    #[test]
    fn test_failed_on_error_line_with_zero_exit() {
        assert!(output(true, "", "error: something went wrong\n").failed());
        assert!(!output(true, "ok\n", "").failed());
    }

    #[test]
    fn test_run_git_version_succeeds() {
        let git = GitCli::new("git", ".");
        let out = git.run(&["--version"]).unwrap();
        assert!(out.success);
        assert!(out.stdout.starts_with("git version"));
    }

    #[test]
    fn test_missing_binary_is_not_installed() {
        let git = GitCli::new("/nonexistent/bin/git-does-not-exist", ".");
        assert!(matches!(git.run(&["--version"]), Err(GitError::NotInstalled)));
        assert!(!git.is_repository());
    }

    #[test]
    fn test_is_repository_false_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new("git", dir.path());
        assert!(!git.is_repository());
    }
}
