use std::str::FromStr;

use thiserror::Error;

pub const HELP: &str = "n: next  p: previous  g N: go to page  s N: page size  r: reload  q: quit";

/// A line typed by the user at the pagination prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Goto(u32),
    PageSize(u32),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' needs a number, got '{value}'")]
    BadNumber { command: String, value: String },

    #[error("'{0}' needs a number")]
    MissingNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let head = head.to_ascii_lowercase();

        let number = |parts: &mut std::str::SplitWhitespace<'_>| -> Result<u32, CommandError> {
            let value = parts
                .next()
                .ok_or_else(|| CommandError::MissingNumber(head.clone()))?;
            value.parse().map_err(|_| CommandError::BadNumber {
                command: head.clone(),
                value: value.to_string(),
            })
        };

        match head.as_str() {
            "n" | "next" => Ok(Command::Next),
            "p" | "prev" => Ok(Command::Prev),
            "g" | "goto" => Ok(Command::Goto(number(&mut parts)?)),
            "s" | "size" => Ok(Command::PageSize(number(&mut parts)?)),
            "r" | "reload" => Ok(Command::Reload),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
