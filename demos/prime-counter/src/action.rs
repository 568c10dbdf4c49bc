//! Actions, one family per screen
//!
//! FRAMEWORK PATTERN: nested action families
//! - Each feature reducer handles one small enum
//! - `AppAction` wraps them with `#[action(nested)]`, which delegates
//!   `name()` to the inner action and generates `From<Inner>`
//! - Extractor functions narrow an `AppAction` back to a family for `pullback`

use compose_dispatch::ActionSummary;

/// Counter screen
#[derive(compose_dispatch::Action, Clone, Debug, PartialEq, Eq)]
pub enum CounterAction {
    CountIncrement,
    CountDecrement,

    /// Intent: look up the `count`-th prime (triggers async task)
    NthPrimeFetch,

    /// Result: lookup finished; `prime` is `None` when it failed
    NthPrimeDidLoad { n: u64, prime: Option<u64> },

    NthPrimeAlertDismiss,
}

/// The "is this prime?" modal
#[derive(compose_dispatch::Action, Clone, Debug, PartialEq, Eq)]
pub enum PrimeModalAction {
    FavoriteSave,
    FavoriteRemove,
}

/// The favorites list
#[derive(compose_dispatch::Action, Clone, Debug, PartialEq, Eq)]
pub enum FavoritePrimesAction {
    /// Delete the entries at these positions of the current list
    FavoritePrimesDelete(Vec<usize>),
}

/// Application actions
///
/// # Categories (from the wrapping variant):
/// - `counter`, `prime_modal`, `favorite_primes`
/// - `uncategorized`: Quit
#[derive(compose_dispatch::Action, Clone, Debug, PartialEq, Eq)]
#[action(infer_categories)]
pub enum AppAction {
    #[action(nested)]
    Counter(CounterAction),

    #[action(nested)]
    PrimeModal(PrimeModalAction),

    #[action(nested)]
    FavoritePrimes(FavoritePrimesAction),

    /// Exit the shell
    Quit,
}

impl AppAction {
    pub fn counter(self) -> Option<CounterAction> {
        match self {
            AppAction::Counter(action) => Some(action),
            _ => None,
        }
    }

    pub fn prime_modal(self) -> Option<PrimeModalAction> {
        match self {
            AppAction::PrimeModal(action) => Some(action),
            _ => None,
        }
    }

    pub fn favorite_primes(self) -> Option<FavoritePrimesAction> {
        match self {
            AppAction::FavoritePrimes(action) => Some(action),
            _ => None,
        }
    }
}

/// Prefix nested actions with their family so log lines stay unambiguous
impl ActionSummary for AppAction {
    fn summary(&self) -> String {
        match self {
            AppAction::Counter(action) => format!("Counter::{:?}", action),
            AppAction::PrimeModal(action) => format!("PrimeModal::{:?}", action),
            AppAction::FavoritePrimes(action) => format!("FavoritePrimes::{:?}", action),
            AppAction::Quit => "Quit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compose_dispatch::Action;

    #[test]
    fn test_extractors_narrow_by_family() {
        let action = AppAction::from(CounterAction::CountIncrement);
        assert_eq!(action.clone().counter(), Some(CounterAction::CountIncrement));
        assert_eq!(action.clone().prime_modal(), None);
        assert_eq!(action.favorite_primes(), None);

        assert_eq!(AppAction::Quit.counter(), None);
    }

    #[test]
    fn test_names_and_categories() {
        let save = AppAction::from(PrimeModalAction::FavoriteSave);
        assert_eq!(save.name(), "FavoriteSave");
        assert_eq!(save.category(), Some("prime_modal"));
        assert!(save.is_prime_modal());

        let delete = AppAction::from(FavoritePrimesAction::FavoritePrimesDelete(vec![0]));
        assert_eq!(delete.category_enum(), AppActionCategory::FavoritePrimes);

        assert_eq!(AppAction::Quit.category(), None);
    }

    #[test]
    fn test_summary_names_family() {
        let action = AppAction::from(CounterAction::NthPrimeDidLoad {
            n: 3,
            prime: Some(5),
        });
        assert_eq!(
            action.summary(),
            "Counter::NthPrimeDidLoad { n: 3, prime: Some(5) }"
        );
    }
}
