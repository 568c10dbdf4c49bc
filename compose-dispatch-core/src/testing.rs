//! Test utilities for compose-dispatch applications
//!
//! - [`TestHarness`]: state under test, a reducer runner, and an action
//!   channel standing in for the application loop
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use compose_dispatch::testing::TestHarness;
//!
//! let mut harness = TestHarness::<AppState, AppAction>::default();
//! harness.apply(&app_reducer, AppAction::Counter(CounterAction::CountIncrement));
//! assert_eq!(harness.state.count, 1);
//!
//! // Hand the sender to code that reports back with actions
//! let tx = harness.sender();
//! tx.send(AppAction::Quit).unwrap();
//! assert_emitted!(harness.drain_emitted(), AppAction::Quit);
//! ```

use tokio::sync::mpsc;

use crate::reducer::Reducer;
use crate::{Action, ActionCategory};

/// Generic test harness.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type (must implement [`Action`])
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Run a reducer against the harness state.
    pub fn apply<R>(&mut self, reducer: &R, action: A) -> R::Output
    where
        R: Reducer<S, A>,
    {
        reducer.reduce(&mut self.state, action)
    }

    /// Run a reducer for each action in order, returning every outcome.
    pub fn apply_all<R, I>(&mut self, reducer: &R, actions: I) -> Vec<R::Output>
    where
        R: Reducer<S, A>,
        I: IntoIterator<Item = A>,
    {
        actions
            .into_iter()
            .map(|action| reducer.reduce(&mut self.state, action))
            .collect()
    }

    /// A sender for code under test that reports back with actions.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action, as an async task would.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Take every action emitted so far.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Wait for the next emitted action, up to `timeout`.
    pub async fn next_emitted(&mut self, timeout: std::time::Duration) -> Option<A> {
        tokio::time::timeout(timeout, self.rx.recv())
            .await
            .ok()
            .flatten()
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Take the emitted actions of one category, leaving the rest queued.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| action.category() == Some(category));

        for action in rest {
            let _ = self.tx.send(action);
        }
        matching
    }
}

/// Assert that an action matching a pattern was emitted.
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, AppAction::Counter(CounterAction::NthPrimeDidLoad { .. }));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count the emitted actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
