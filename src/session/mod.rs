//! The interactive command loop.
//!
//! Reads one line at a time, runs the matching command, and prints the
//! result. A failing command reports its error and the loop continues;
//! only `quit` or end of input ends the session.

pub mod command;
pub mod prompt;

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::commit::{DiffSummary, analyze, parse_diff, review_message, suggest};
use crate::config::Settings;
use crate::error::{CommitError, GitError, SessionError};
use crate::git::Vcs;

pub use command::{Command, ConfigAction, HELP_TEXT, parse_command};
pub use prompt::{LinePrompt, Prompt, TerminalPrompt};

/// Final entry of the `auto` picker.
const WRITE_OWN: &str = "(write my own message)";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Check the repository and read the staged diff.
///
/// The repository check always runs first, so no diff command is issued
/// outside a work tree. An empty diff is [`CommitError::NoStagedChanges`].
pub fn load_staged(vcs: &impl Vcs, workdir: &Path) -> Result<DiffSummary, SessionError> {
    if !vcs.is_repository() {
        return Err(GitError::NotARepository(workdir.to_path_buf()).into());
    }

    let summary = parse_diff(&vcs.staged_diff()?);
    if summary.is_empty() {
        return Err(CommitError::NoStagedChanges.into());
    }

    debug!(
        "Staged: {} files, +{} -{}",
        summary.file_count(),
        summary.additions,
        summary.deletions
    );
    Ok(summary)
}

/// One interactive session over a repository.
pub struct Session<V, P, W> {
    vcs: V,
    prompt: P,
    out: W,
    settings: Settings,
}

impl<V: Vcs, P: Prompt, W: Write> Session<V, P, W> {
    pub fn new(vcs: V, prompt: P, out: W, settings: Settings) -> Self {
        Self {
            vcs,
            prompt,
            out,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consume the session and hand back its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input.
    ///
    /// Only a failure to write output ends the loop with an error.
    pub fn run(&mut self) -> Result<(), SessionError> {
        writeln!(self.out, "stagehint: type 'help' for commands")?;

        loop {
            let line = match self.prompt.read_command() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopping session: {}", e);
                    break;
                }
            };

            match self.execute(parse_command(&line)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(SessionError::Output(e)) => return Err(SessionError::Output(e)),
                Err(e) => self.report(&e)?,
            }
        }

        writeln!(self.out, "Bye.")?;
        Ok(())
    }

    /// Run a single command.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::Suggest => self.suggest()?,
            Command::Auto => self.auto_commit()?,
            Command::Analyze => self.analyze()?,
            Command::Config(action) => self.configure(action)?,
            Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Unknown(input) => writeln!(
                self.out,
                "Unknown command '{}'. Type 'help' for available commands.",
                input
            )?,
        }
        Ok(Flow::Continue)
    }

    /// Print a command failure. Expected conditions print without a prefix.
    fn report(&mut self, error: &SessionError) -> Result<(), SessionError> {
        match error {
            SessionError::Git(GitError::NotARepository(_))
            | SessionError::Commit(CommitError::NoStagedChanges) => {
                debug!("Command aborted: {}", error);
                writeln!(self.out, "{}", error)?;
            }
            _ => {
                debug!("Command failed: {}", error);
                writeln!(self.out, "Error: {}", error)?;
            }
        }
        Ok(())
    }

    fn rendered_suggestions(&self, summary: &DiffSummary) -> Vec<String> {
        suggest(summary, self.settings.max_suggestions)
            .iter()
            .map(|s| s.render(self.settings.style))
            .collect()
    }

    fn suggest(&mut self) -> Result<(), SessionError> {
        let summary = load_staged(&self.vcs, &self.settings.workdir)?;
        let messages = self.rendered_suggestions(&summary);

        writeln!(self.out, "Suggested commit messages:")?;
        for (i, message) in messages.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, message)?;
        }
        Ok(())
    }

    fn auto_commit(&mut self) -> Result<(), SessionError> {
        let summary = load_staged(&self.vcs, &self.settings.workdir)?;
        let messages = self.rendered_suggestions(&summary);

        let mut items = messages.clone();
        items.push(WRITE_OWN.to_string());

        let Some(choice) = self.prompt.select("Commit message", &items)? else {
            writeln!(self.out, "Commit cancelled.")?;
            return Ok(());
        };

        let message = match messages.get(choice) {
            Some(message) => message.clone(),
            None => match self.prompt.read_text("Commit message")? {
                Some(text) if !text.trim().is_empty() => {
                    let text = text.trim().to_string();
                    for note in review_message(&text).notes() {
                        writeln!(self.out, "Note: {}", note)?;
                    }
                    text
                }
                _ => {
                    writeln!(self.out, "Empty message, commit cancelled.")?;
                    return Ok(());
                }
            },
        };

        let question = format!("Commit with message \"{}\"?", message);
        if !self.prompt.confirm(&question, false)? {
            writeln!(self.out, "Commit cancelled.")?;
            return Ok(());
        }

        let output = self.vcs.commit(&message)?;
        info!("Committed: {}", message);
        writeln!(self.out, "{}", output.trim_end())?;
        Ok(())
    }

    fn analyze(&mut self) -> Result<(), SessionError> {
        let summary = load_staged(&self.vcs, &self.settings.workdir)?;
        writeln!(self.out, "{}", analyze(&summary).render())?;
        Ok(())
    }

    fn configure(&mut self, action: ConfigAction) -> Result<(), SessionError> {
        match action {
            ConfigAction::Show => {
                writeln!(self.out, "Current settings:")?;
                writeln!(self.out, "{}", self.settings.describe())?;
            }
            ConfigAction::Set { key, value } => {
                self.settings.set(&key, &value)?;
                writeln!(self.out, "Set {} = {}", key, value)?;
            }
            ConfigAction::Usage => {
                writeln!(self.out, "Usage: config <key> <value>  (keys: style, max)")?;
            }
        }
        Ok(())
    }
}
