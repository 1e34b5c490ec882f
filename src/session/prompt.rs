//! Reading commands, confirmations, and choices from the user.

use std::io::{BufRead, ErrorKind};

use dialoguer::{Confirm, Input, Select};

use crate::error::SessionError;

/// Prompt text for the command line.
const COMMAND_PROMPT: &str = "stagehint";

/// Source of user input for a session.
///
/// `Ok(None)` from a read means the input is exhausted (EOF / Ctrl-D).
pub trait Prompt {
    /// Read the next command line.
    fn read_command(&mut self) -> Result<Option<String>, SessionError>;

    /// Read free text, such as a hand-written commit message.
    fn read_text(&mut self, prompt: &str) -> Result<Option<String>, SessionError>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SessionError>;

    /// Pick one of `items`. `Ok(None)` means the user backed out.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, SessionError>;
}

/// Interactive prompts on a terminal, rendered by dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

/// Map dialoguer's end-of-input to `None` and everything else to an error.
fn eof_as_none<T>(result: Result<T, dialoguer::Error>) -> Result<Option<T>, SessionError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e))
            if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::Interrupted) =>
        {
            Ok(None)
        }
        Err(e) => Err(SessionError::Prompt(e.to_string())),
    }
}

impl Prompt for TerminalPrompt {
    fn read_command(&mut self) -> Result<Option<String>, SessionError> {
        eof_as_none(
            Input::<String>::new()
                .with_prompt(COMMAND_PROMPT)
                .allow_empty(true)
                .interact_text(),
        )
    }

    fn read_text(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        eof_as_none(
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text(),
        )
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SessionError> {
        let answer = eof_as_none(Confirm::new().with_prompt(prompt).default(default).interact())?;
        Ok(answer.unwrap_or(false))
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, SessionError> {
        let choice = eof_as_none(
            Select::new()
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact_opt(),
        )?;
        Ok(choice.flatten())
    }
}

/// Line-oriented prompts over any reader, for piped input and tests.
///
/// Nothing is echoed. Confirmations accept `y`/`yes`; an empty line takes
/// the default. Selections take a 1-based number; an empty line picks the
/// first item.
#[derive(Debug)]
pub struct LinePrompt<R> {
    input: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn next_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| SessionError::Prompt(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn read_command(&mut self) -> Result<Option<String>, SessionError> {
        self.next_line()
    }

    fn read_text(&mut self, _prompt: &str) -> Result<Option<String>, SessionError> {
        self.next_line()
    }

    fn confirm(&mut self, _prompt: &str, default: bool) -> Result<bool, SessionError> {
        let Some(line) = self.next_line()? else {
            return Ok(false);
        };
        Ok(match line.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn select(&mut self, _prompt: &str, items: &[String]) -> Result<Option<usize>, SessionError> {
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok((!items.is_empty()).then_some(0));
        }
        Ok(line
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=items.len()).contains(n))
            .map(|n| n - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> LinePrompt<Cursor<String>> {
        LinePrompt::new(Cursor::new(input.to_string()))
    }

    fn items() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_read_command_until_eof() {
        let mut p = prompt("suggest\r\nquit\n");
        assert_eq!(p.read_command().unwrap().as_deref(), Some("suggest"));
        assert_eq!(p.read_command().unwrap().as_deref(), Some("quit"));
        assert_eq!(p.read_command().unwrap(), None);
    }

    #[test]
    fn test_confirm_answers() {
        let mut p = prompt("y\nYES\nn\n\nmaybe\n");
        assert!(p.confirm("?", false).unwrap());
        assert!(p.confirm("?", false).unwrap());
        assert!(!p.confirm("?", true).unwrap());
        assert!(p.confirm("?", true).unwrap());
        assert!(!p.confirm("?", true).unwrap());
        // EOF never confirms
        assert!(!p.confirm("?", true).unwrap());
    }

    #[test]
    fn test_select_by_number() {
        let mut p = prompt("2\n\n3\nx\n");
        assert_eq!(p.select("?", &items()).unwrap(), Some(1));
        assert_eq!(p.select("?", &items()).unwrap(), Some(0));
        assert_eq!(p.select("?", &items()).unwrap(), None);
        assert_eq!(p.select("?", &items()).unwrap(), None);
        assert_eq!(p.select("?", &items()).unwrap(), None);
    }
}
