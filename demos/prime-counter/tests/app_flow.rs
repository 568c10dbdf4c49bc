//! End-to-end flows through the store: commands in, state and effects out

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use compose_dispatch::testing::TestHarness;
use compose_dispatch::{
    ActionFilter, ActionLoggerMiddleware, DispatchResult, EffectStore, StoreWithMiddleware,
    TaskManager,
};

use prime_counter::action::{AppAction, CounterAction, PrimeModalAction};
use prime_counter::api::PrimeLookup;
use prime_counter::command::{Command, CommandError};
use prime_counter::effect::{handle_effect, Effect};
use prime_counter::reducer::app_reducer;
use prime_counter::state::{ActivityKind, AppState, NthPrimeAlert};

const PRIMES: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Answers from a fixed table; unknown positions fail like a bad response
#[derive(Clone)]
struct TableLookup;

impl PrimeLookup for TableLookup {
    async fn nth_prime(&self, n: u64) -> Option<u64> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        PRIMES.get(index).copied()
    }
}

fn run_line(store: &mut EffectStore<AppState, AppAction, Effect>, line: &str) -> Vec<Effect> {
    let command: Command = line.parse().unwrap();
    match command.action(store.state()).unwrap() {
        Some(action) => store.dispatch(action).effects,
        None => Vec::new(),
    }
}

#[test]
fn test_shell_session() {
    let mut store = EffectStore::new(AppState::default(), app_reducer());
    let notified = Rc::new(Cell::new(0));
    let seen = notified.clone();
    store.subscribe(move |_| seen.set(seen.get() + 1));

    let lines = [
        "incr", "incr", "save", "incr", "save", "incr", "incr", "incr", "incr", "save",
    ];
    for line in lines {
        run_line(&mut store, line);
    }
    assert_eq!(store.state().count, 7);
    assert_eq!(store.state().favorite_primes, vec![2, 3, 7]);

    run_line(&mut store, "delete 1 5");
    assert_eq!(store.state().favorite_primes, vec![2, 7]);

    run_line(&mut store, "remove");
    assert_eq!(store.state().favorite_primes, vec![2]);

    let kinds: Vec<ActivityKind> = store
        .state()
        .activity_feed
        .iter()
        .map(|activity| activity.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ActivityKind::AddedFavoritePrime(2),
            ActivityKind::AddedFavoritePrime(3),
            ActivityKind::AddedFavoritePrime(7),
            ActivityKind::RemovedFavoritePrime(3),
            ActivityKind::RemovedFavoritePrime(7),
        ]
    );

    // Every command above changed the state
    assert_eq!(notified.get(), 12);
}

#[test]
fn test_read_only_commands_do_not_notify() {
    let mut store = EffectStore::new(AppState::default(), app_reducer());
    let notified = Rc::new(Cell::new(0));
    let seen = notified.clone();
    store.subscribe(move |_| seen.set(seen.get() + 1));

    run_line(&mut store, "show");
    run_line(&mut store, "json");
    run_line(&mut store, "quit");
    run_line(&mut store, "delete 3");

    assert_eq!(notified.get(), 0);
    assert_eq!(store.state(), &AppState::default());
}

#[test]
fn test_gated_commands_are_refused() {
    let store = EffectStore::new(
        AppState {
            count: 9,
            ..AppState::default()
        },
        app_reducer(),
    );

    assert_eq!(
        Command::Save.action(store.state()),
        Err(CommandError::NotPrime(9))
    );
    assert_eq!(
        Command::Remove.action(store.state()),
        Err(CommandError::NotPrime(9))
    );
}

#[tokio::test]
async fn test_nth_prime_round_trip() {
    let mut store = EffectStore::new(AppState::default(), app_reducer());
    let mut harness = TestHarness::<(), AppAction>::default();
    let mut tasks = TaskManager::new(harness.sender());

    for _ in 0..6 {
        store.dispatch(CounterAction::CountIncrement.into());
    }
    let effects = run_line(&mut store, "nth");
    assert_eq!(effects, vec![Effect::FetchNthPrime { n: 6 }]);
    assert!(store.state().nth_prime.in_flight);

    for effect in effects {
        handle_effect(effect, &mut tasks, &TableLookup);
    }

    let action = harness
        .next_emitted(Duration::from_secs(1))
        .await
        .expect("lookup should report back");
    assert_eq!(
        action,
        AppAction::Counter(CounterAction::NthPrimeDidLoad {
            n: 6,
            prime: Some(13),
        })
    );

    store.dispatch(action);
    assert!(!store.state().nth_prime.in_flight);
    assert_eq!(
        store.state().nth_prime.alert,
        Some(NthPrimeAlert { n: 6, prime: 13 })
    );

    run_line(&mut store, "dismiss");
    assert!(store.state().nth_prime.alert.is_none());
}

#[tokio::test]
async fn test_failed_lookup_clears_in_flight() {
    let mut store = EffectStore::new(
        AppState {
            count: 100,
            ..AppState::default()
        },
        app_reducer(),
    );
    let mut harness = TestHarness::<(), AppAction>::default();
    let mut tasks = TaskManager::new(harness.sender());

    for effect in run_line(&mut store, "nth") {
        handle_effect(effect, &mut tasks, &TableLookup);
    }

    let action = harness
        .next_emitted(Duration::from_secs(1))
        .await
        .expect("lookup should report back");
    assert_eq!(
        action,
        AppAction::Counter(CounterAction::NthPrimeDidLoad { n: 100, prime: None })
    );

    store.dispatch(action);
    assert!(!store.state().nth_prime.in_flight);
    assert!(store.state().nth_prime.alert.is_none());

    // A new lookup may start
    assert_eq!(
        run_line(&mut store, "nth"),
        vec![Effect::FetchNthPrime { n: 100 }]
    );
}

#[test]
fn test_action_logger_records_history() {
    let logger = ActionLoggerMiddleware::new(ActionFilter::new(None, Some("Count*")))
        .with_history(4);
    let mut store: StoreWithMiddleware<_, _, _, DispatchResult<Effect>> =
        StoreWithMiddleware::new(AppState::default(), app_reducer(), logger);

    store.dispatch(CounterAction::CountIncrement.into());
    store.dispatch(CounterAction::CountIncrement.into());
    store.dispatch(PrimeModalAction::FavoriteSave.into());
    store.dispatch(AppAction::Quit);

    let history = store.middleware().history().unwrap();
    let logged: Vec<(&str, Option<bool>)> = history
        .entries()
        .map(|entry| (entry.name, entry.state_changed))
        .collect();
    assert_eq!(
        logged,
        vec![("FavoriteSave", Some(true)), ("Quit", Some(false))]
    );
    assert_eq!(store.state().favorite_primes, vec![2]);
}
