//! Shell commands - one per input line
//!
//! FRAMEWORK PATTERN: input maps to actions
//! - Parsing knows nothing about state
//! - `Command::action` reads the state only to decide which actions are on
//!   offer (the prime modal's save/remove buttons)

use std::str::FromStr;

use thiserror::Error;

use crate::action::{AppAction, CounterAction, FavoritePrimesAction, PrimeModalAction};
use crate::prime::is_prime;
use crate::state::AppState;

pub const HELP: &str = "\
commands:
  incr | +          increment the counter
  decr | -          decrement the counter
  nth               look up the n-th prime for the current count
  dismiss           dismiss the n-th prime alert
  save              save the count as a favorite (prime counts only)
  remove            remove the count from favorites (prime counts only)
  delete <i>...     delete favorites at the given positions
  show              print the state
  json              print the state as JSON
  help              print this help
  quit              exit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Incr,
    Decr,
    Nth,
    Dismiss,
    Save,
    Remove,
    Delete(Vec<usize>),
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("`delete` needs at least one position")]
    MissingIndex,

    #[error("{0:?} is not a list position")]
    BadIndex(String),

    #[error("{0} is not prime")]
    NotPrime(i64),

    #[error("{0} is not a favorite")]
    NotFavorite(i64),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "incr" | "+" => Command::Incr,
            "decr" | "-" => Command::Decr,
            "nth" => Command::Nth,
            "dismiss" => Command::Dismiss,
            "save" => Command::Save,
            "remove" => Command::Remove,
            "delete" | "del" => {
                let indices = words
                    .map(|word| {
                        word.parse::<usize>()
                            .map_err(|_| CommandError::BadIndex(word.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if indices.is_empty() {
                    return Err(CommandError::MissingIndex);
                }
                return Ok(Command::Delete(indices));
            }
            "show" => Command::Show,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(command)
    }
}

impl Command {
    /// The action this command dispatches, if any.
    ///
    /// `save` and `remove` are only offered while the count is prime, and
    /// `remove` only when the count is already a favorite.
    pub fn action(&self, state: &AppState) -> Result<Option<AppAction>, CommandError> {
        let action: AppAction = match self {
            Command::Incr => CounterAction::CountIncrement.into(),
            Command::Decr => CounterAction::CountDecrement.into(),
            Command::Nth => CounterAction::NthPrimeFetch.into(),
            Command::Dismiss => CounterAction::NthPrimeAlertDismiss.into(),
            Command::Save => {
                if !is_prime(state.count) {
                    return Err(CommandError::NotPrime(state.count));
                }
                PrimeModalAction::FavoriteSave.into()
            }
            Command::Remove => {
                if !is_prime(state.count) {
                    return Err(CommandError::NotPrime(state.count));
                }
                if !state.favorite_primes.contains(&state.count) {
                    return Err(CommandError::NotFavorite(state.count));
                }
                PrimeModalAction::FavoriteRemove.into()
            }
            Command::Delete(indices) => {
                FavoritePrimesAction::FavoritePrimesDelete(indices.clone()).into()
            }
            Command::Quit => AppAction::Quit,
            Command::Show | Command::Json | Command::Help => return Ok(None),
        };
        Ok(Some(action))
    }
}
