//! Reducers - pure functions: (state, action) -> outcome
//!
//! FRAMEWORK PATTERN: composed reducers
//! - One small reducer per screen, over its view of the state and its family
//!   of actions
//! - `pullback` lifts each one to `AppState` / `AppAction`
//! - `combine!` runs them in order as the single application reducer
//! - The counter reducer declares effects; the others only report changes and
//!   are lifted with `map_output`

use compose_dispatch::{combine, pullback, Combined, DispatchResult, GetSetLens, ReducerExt};

use crate::action::{AppAction, CounterAction, FavoritePrimesAction, PrimeModalAction};
use crate::effect::Effect;
use crate::state::{
    Activity, ActivityKind, AppState, CounterState, FavoritePrimesState, NthPrimeAlert,
    PrimeModalState,
};

/// The reducer the store runs
pub type AppReducer = Combined<AppState, AppAction, DispatchResult<Effect>>;

/// Build the application reducer from the three screen reducers.
pub fn app_reducer() -> AppReducer {
    combine![
        pullback(
            counter_reducer,
            GetSetLens::new(CounterState::get, CounterState::set),
            AppAction::counter,
        ),
        pullback(
            prime_modal_reducer,
            GetSetLens::new(PrimeModalState::get, PrimeModalState::set),
            AppAction::prime_modal,
        )
        .map_output(DispatchResult::<Effect>::from),
        pullback(
            favorite_primes_reducer,
            GetSetLens::new(FavoritePrimesState::get, FavoritePrimesState::set),
            AppAction::favorite_primes,
        )
        .map_output(DispatchResult::<Effect>::from),
    ]
}

/// Counter screen: the count and the n-th prime lookup
///
/// Incrementing past `i64::MAX` or decrementing past `i64::MIN` leaves the
/// count where it is and reports no change.
pub fn counter_reducer(state: &mut CounterState, action: CounterAction) -> DispatchResult<Effect> {
    match action {
        CounterAction::CountIncrement => step_count(&mut state.count, 1),
        CounterAction::CountDecrement => step_count(&mut state.count, -1),

        CounterAction::NthPrimeFetch => {
            // There is no 0th prime
            if state.count < 1 || state.nth_prime.in_flight {
                return DispatchResult::unchanged();
            }
            state.nth_prime.in_flight = true;
            DispatchResult::changed_with(Effect::FetchNthPrime {
                n: state.count as u64,
            })
        }

        CounterAction::NthPrimeDidLoad { n, prime } => {
            if !state.nth_prime.in_flight {
                return DispatchResult::unchanged();
            }
            state.nth_prime.in_flight = false;
            state.nth_prime.alert = prime.map(|prime| NthPrimeAlert { n, prime });
            DispatchResult::changed()
        }

        CounterAction::NthPrimeAlertDismiss => {
            if state.nth_prime.alert.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }
    }
}

fn step_count(count: &mut i64, delta: i64) -> DispatchResult<Effect> {
    match count.checked_add(delta) {
        Some(next) => {
            *count = next;
            DispatchResult::changed()
        }
        None => DispatchResult::unchanged(),
    }
}

/// Prime modal: save or remove the current count as a favorite
///
/// Neither action checks primality or membership; that gating belongs to
/// whoever offers the actions.
pub fn prime_modal_reducer(state: &mut PrimeModalState, action: PrimeModalAction) -> bool {
    let count = state.count;
    match action {
        PrimeModalAction::FavoriteSave => {
            state.favorite_primes.push(count);
            state
                .activity_feed
                .push(Activity::now(ActivityKind::AddedFavoritePrime(count)));
        }

        PrimeModalAction::FavoriteRemove => {
            state.favorite_primes.retain(|&prime| prime != count);
            state
                .activity_feed
                .push(Activity::now(ActivityKind::RemovedFavoritePrime(count)));
        }
    }
    true
}

/// Favorites list: delete entries by position
pub fn favorite_primes_reducer(
    state: &mut FavoritePrimesState,
    action: FavoritePrimesAction,
) -> bool {
    match action {
        FavoritePrimesAction::FavoritePrimesDelete(mut indices) => {
            indices.sort_unstable();
            indices.dedup();

            // Resolve every index before touching the list
            let mut removed: Vec<i64> = Vec::new();
            for prime in indices
                .into_iter()
                .filter_map(|index| state.favorite_primes.get(index).copied())
            {
                if !removed.contains(&prime) {
                    removed.push(prime);
                }
            }

            if removed.is_empty() {
                return false;
            }

            state
                .favorite_primes
                .retain(|prime| !removed.contains(prime));
            state.activity_feed.extend(
                removed
                    .into_iter()
                    .map(|prime| Activity::now(ActivityKind::RemovedFavoritePrime(prime))),
            );
            true
        }
    }
}
