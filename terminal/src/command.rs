//! Line commands accepted by the terminal front-end.

use std::str::FromStr;

use quickfx_common::Currency;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  amount <value>   set the amount (digits and one decimal point)
  from <CODE>      select the currency to convert from
  to <CODE>        select the currency to convert to
  swap             exchange the two currencies
  retry            fetch the rate again
  list             show available currencies
  help             show this message
  quit             exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Amount(String),
    From(Currency),
    To(Currency),
    Swap,
    Retry,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs a currency code")]
    MissingCode(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            // The raw text goes through the amount filter, so "amount" alone clears the field.
            "amount" | "a" => Ok(Command::Amount(rest.to_string())),
            "from" | "f" => code(rest, "from").map(Command::From),
            "to" | "t" => code(rest, "to").map(Command::To),
            "swap" | "s" => Ok(Command::Swap),
            "retry" | "r" => Ok(Command::Retry),
            "list" | "l" => Ok(Command::List),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn code(rest: &str, command: &'static str) -> Result<Currency, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingCode(command))
    } else {
        Ok(Currency::new(rest))
    }
}
