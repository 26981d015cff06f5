//! Line commands of the terminal front-end.

use sviss_todo_core::{TodoId, TodoItem};
use thiserror::Error;

/// Help text listing every command.
pub const HELP: &str = "Commands: add <text> | rm <n|id> | ls | help | quit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add an item with the given text
    Add(String),
    /// Remove an item
    Remove(Target),
    /// Show the list again
    List,
    /// Show the help text
    Help,
    /// Leave
    Quit,
}

/// Which item `rm` refers to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the displayed list
    Position(usize),
    /// Item id as shown by the server
    Id(TodoId),
}

impl Target {
    /// Id of the targeted item, if the position is in range.
    #[must_use]
    pub fn resolve(&self, items: &[TodoItem]) -> Option<TodoId> {
        match self {
            Self::Position(n) => n
                .checked_sub(1)
                .and_then(|index| items.get(index))
                .map(|item| item.id.clone()),
            Self::Id(id) => Some(id.clone()),
        }
    }
}

/// Errors from parsing an input line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("Type a command. {HELP}")]
    Empty,

    /// The first word is not a command
    #[error("Unknown command {0:?}. {HELP}")]
    Unknown(String),

    /// The command needs an argument
    #[error("Usage: {0}")]
    MissingArgument(&'static str),
}

/// Parse one input line.
///
/// # Errors
///
/// Returns error for blank lines, unknown commands and missing arguments.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "add" | "a" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument("add <text>"))
            } else {
                Ok(Command::Add(rest.to_string()))
            }
        },
        "rm" | "del" | "delete" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("rm <n|id>"));
            }
            Ok(Command::Remove(rest.parse().map_or_else(
                |_| Target::Id(TodoId::from(rest)),
                Target::Position,
            )))
        },
        "ls" | "list" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}
