//! Stdin command parsing.

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  next, n            next page
  prev, p            previous page
  reload, r          retry the last failed load, or reload the first page
  search, s <term>   look up a name (empty term lists the first page)
  show, ls           show the current records again
  help, h, ?         this text
  quit, q, exit      leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Reload,
    Search(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (type `help` for a list)")]
    Unknown(String),

    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(String),
}

impl Command {
    /// Parses a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "search" | "s" => return Ok(Some(Self::Search(rest.to_string()))),
            "next" | "n" => Self::Next,
            "prev" | "previous" | "p" => Self::Prev,
            "reload" | "r" => Self::Reload,
            "show" | "ls" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        if !rest.is_empty() {
            return Err(CommandError::UnexpectedArgument(verb.to_string()));
        }
        Ok(Some(command))
    }
}
