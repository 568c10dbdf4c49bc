//! Application state - single source of truth
//!
//! FRAMEWORK PATTERN: one aggregate state, narrow views for feature reducers
//! - `AppState` is owned by the store and only changed by dispatch
//! - Each feature reducer sees a view struct (`CounterState`,
//!   `PrimeModalState`, `FavoritePrimesState`) holding just the fields it
//!   needs; `get`/`set` pairs on the views are the lenses used by `pullback`

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The logged-in user. Carried in state but not used by any reducer yet.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub bio: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "prime", rename_all = "snake_case")]
pub enum ActivityKind {
    AddedFavoritePrime(i64),
    RemovedFavoritePrime(i64),
}

/// One entry of the append-only activity feed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activity {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
}

impl Activity {
    /// An activity stamped with the current time
    pub fn now(kind: ActivityKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// Result of an n-th prime lookup, shown until dismissed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NthPrimeAlert {
    pub n: u64,
    pub prime: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NthPrimeState {
    /// A lookup has been requested and has not reported back
    pub in_flight: bool,
    pub alert: Option<NthPrimeAlert>,
}

/// Application state - everything the shell needs to describe
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppState {
    /// Counter value, no range restriction
    pub count: i64,

    /// Favorites in the order they were saved; duplicates are possible
    pub favorite_primes: Vec<i64>,

    pub logged_in_user: Option<User>,

    /// Append-only
    pub activity_feed: Vec<Activity>,

    pub nth_prime: NthPrimeState,
}

// ============================================================================
// Views
// ============================================================================

/// What the counter screen reads and writes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CounterState {
    pub count: i64,
    pub nth_prime: NthPrimeState,
}

impl CounterState {
    pub fn get(state: &AppState) -> Self {
        Self {
            count: state.count,
            nth_prime: state.nth_prime.clone(),
        }
    }

    pub fn set(state: &mut AppState, view: Self) {
        state.count = view.count;
        state.nth_prime = view.nth_prime;
    }
}

/// What the "is this prime?" modal reads and writes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimeModalState {
    pub count: i64,
    pub favorite_primes: Vec<i64>,
    pub activity_feed: Vec<Activity>,
}

impl PrimeModalState {
    pub fn get(state: &AppState) -> Self {
        Self {
            count: state.count,
            favorite_primes: state.favorite_primes.clone(),
            activity_feed: state.activity_feed.clone(),
        }
    }

    pub fn set(state: &mut AppState, view: Self) {
        state.count = view.count;
        state.favorite_primes = view.favorite_primes;
        state.activity_feed = view.activity_feed;
    }
}

/// What the favorites list reads and writes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FavoritePrimesState {
    pub favorite_primes: Vec<i64>,
    pub activity_feed: Vec<Activity>,
}

impl FavoritePrimesState {
    pub fn get(state: &AppState) -> Self {
        Self {
            favorite_primes: state.favorite_primes.clone(),
            activity_feed: state.activity_feed.clone(),
        }
    }

    pub fn set(state: &mut AppState, view: Self) {
        state.favorite_primes = view.favorite_primes;
        state.activity_feed = view.activity_feed;
    }
}
