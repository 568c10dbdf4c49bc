//! Plain-text rendering of the state

use std::fmt::Write as _;

use crate::prime::is_prime;
use crate::state::{ActivityKind, AppState};

/// How many feed entries `render` shows
pub const FEED_TAIL: usize = 5;

pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    let _ = write!(out, "count: {}", state.count);
    if is_prime(state.count) {
        let verdict = if state.favorite_primes.contains(&state.count) {
            "prime, favorite"
        } else {
            "prime"
        };
        let _ = write!(out, " ({})", verdict);
    }
    out.push('\n');

    if state.nth_prime.in_flight {
        out.push_str("nth prime: looking up...\n");
    }
    if let Some(alert) = state.nth_prime.alert {
        let _ = writeln!(out, "nth prime: the {}th prime is {}", alert.n, alert.prime);
    }

    out.push_str("favorites:");
    if state.favorite_primes.is_empty() {
        out.push_str(" none");
    }
    for (index, prime) in state.favorite_primes.iter().enumerate() {
        let _ = write!(out, " [{}] {}", index, prime);
    }
    out.push('\n');

    let skip = state.activity_feed.len().saturating_sub(FEED_TAIL);
    for activity in &state.activity_feed[skip..] {
        let (verb, prime) = match activity.kind {
            ActivityKind::AddedFavoritePrime(prime) => ("added", prime),
            ActivityKind::RemovedFavoritePrime(prime) => ("removed", prime),
        };
        let _ = writeln!(
            out,
            "  {} {} {}",
            activity.timestamp.format("%H:%M:%S"),
            verb,
            prime
        );
    }

    out
}
