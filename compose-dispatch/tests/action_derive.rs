//! Tests for #[derive(Action)]

#![allow(dead_code)]

use compose_dispatch::{Action, ActionCategory};

#[derive(compose_dispatch::Action, Clone, Debug, PartialEq)]
enum CounterAction {
    CountIncrement,
    CountDecrement,
    NthPrimeDidLoad { n: u64, prime: Option<u64> },
}

#[derive(compose_dispatch::Action, Clone, Debug, PartialEq)]
enum ListAction {
    Delete(Vec<usize>),
}

#[derive(compose_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
enum AppAction {
    #[action(nested)]
    Counter(CounterAction),
    #[action(nested)]
    FavoritePrimes(ListAction),
    #[action(category = "shell")]
    Quit,
    Refresh,
}

#[test]
fn test_variant_names() {
    assert_eq!(CounterAction::CountIncrement.name(), "CountIncrement");
    assert_eq!(
        CounterAction::NthPrimeDidLoad { n: 1, prime: Some(2) }.name(),
        "NthPrimeDidLoad"
    );
    assert_eq!(ListAction::Delete(vec![0]).name(), "Delete");
}

#[test]
fn test_nested_name_delegates_to_inner() {
    assert_eq!(
        AppAction::Counter(CounterAction::CountDecrement).name(),
        "CountDecrement"
    );
    assert_eq!(AppAction::FavoritePrimes(ListAction::Delete(vec![])).name(), "Delete");
    assert_eq!(AppAction::Quit.name(), "Quit");
}

#[test]
fn test_nested_from() {
    let action: AppAction = CounterAction::CountIncrement.into();
    assert_eq!(action, AppAction::Counter(CounterAction::CountIncrement));

    let action = AppAction::from(ListAction::Delete(vec![2, 0]));
    assert_eq!(action, AppAction::FavoritePrimes(ListAction::Delete(vec![2, 0])));
}

#[test]
fn test_categories() {
    let counter = AppAction::Counter(CounterAction::CountIncrement);
    assert_eq!(counter.category(), Some("counter"));
    assert!(counter.is_counter());
    assert!(!counter.is_favorite_primes());

    let delete = AppAction::FavoritePrimes(ListAction::Delete(vec![]));
    assert_eq!(delete.category_enum(), AppActionCategory::FavoritePrimes);

    assert_eq!(AppAction::Quit.category(), Some("shell"));
    assert!(AppAction::Quit.is_shell());
    assert_eq!(AppAction::Refresh.category(), None);
    assert_eq!(AppAction::Refresh.category_enum(), AppActionCategory::Uncategorized);
}

#[test]
fn test_category_enum_listing() {
    let names: Vec<&str> = AppActionCategory::all().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["counter", "favorite_primes", "shell", "uncategorized"]);
}

#[test]
fn test_action_category_trait() {
    fn category_of<A: ActionCategory>(action: &A) -> Option<&'static str> {
        ActionCategory::category(action)
    }

    assert_eq!(
        category_of(&AppAction::FavoritePrimes(ListAction::Delete(vec![1]))),
        Some("favorite_primes")
    );
}
