//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and handled by the main loop.
//! This keeps the reducer pure while making async operations explicit.

use compose_dispatch::TaskManager;

use crate::action::{AppAction, CounterAction};
use crate::api::PrimeLookup;

/// Task key for the n-th prime lookup; a new lookup replaces a running one
pub const NTH_PRIME_TASK: &str = "nth_prime";

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up the `n`-th prime; the result comes back as
    /// `CounterAction::NthPrimeDidLoad`
    FetchNthPrime { n: u64 },
}

/// Turn an effect into a task whose result is sent back as an action.
///
/// Must be called from within a tokio runtime.
pub fn handle_effect<L>(effect: Effect, tasks: &mut TaskManager<AppAction>, lookup: &L)
where
    L: PrimeLookup + Clone + Send + Sync + 'static,
{
    match effect {
        Effect::FetchNthPrime { n } => {
            tracing::debug!(n, "spawning nth prime lookup");
            let lookup = lookup.clone();
            tasks.spawn(NTH_PRIME_TASK, async move {
                let prime = lookup.nth_prime(n).await;
                AppAction::from(CounterAction::NthPrimeDidLoad { n, prime })
            });
        }
    }
}
