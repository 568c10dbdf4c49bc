//! Core traits and types for compose-dispatch
//!
//! This crate provides the foundational abstractions for centralized state
//! management with composable reducers, following a Redux/Elm-inspired
//! architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Values that describe state changes
//! - **Reducer**: A function mutating state in place for an action
//! - **Store**: Centralized state container; the single mutation point
//! - **combine / pullback**: Build the application reducer from small ones
//! - **Effects**: Declarative side effects returned by reducers, carried out
//!   by keyed async tasks that report back with actions
//!
//! # Basic Example
//!
//! ```ignore
//! use compose_dispatch_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     CountIncrement,
//!     CountDecrement,
//! }
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum AppAction {
//!     #[action(nested)]
//!     Counter(CounterAction),
//! }
//!
//! fn counter(count: &mut i64, action: CounterAction) -> bool {
//!     match action {
//!         CounterAction::CountIncrement => *count += 1,
//!         CounterAction::CountDecrement => *count -= 1,
//!     }
//!     true
//! }
//!
//! fn counter_action(action: AppAction) -> Option<CounterAction> {
//!     match action {
//!         AppAction::Counter(action) => Some(action),
//!     }
//! }
//!
//! let reducer = combine![pullback(
//!     counter,
//!     FieldLens::new(|s: &mut AppState| &mut s.count),
//!     counter_action,
//! )];
//! let mut store = Store::new(AppState::default(), reducer);
//! store.subscribe(|state| println!("count = {}", state.count));
//! store.dispatch(CounterAction::CountIncrement.into());
//! ```
//!
//! # Async Effect Pattern
//!
//! Reducers never perform I/O. An effect reducer returns
//! [`DispatchResult<E>`]; the application loop hands each effect to a
//! [`TaskManager`] (feature `tasks`), and the task's result comes back as an
//! action:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(action) = action_rx.recv() => {
//!             for effect in store.dispatch(action).effects {
//!                 match effect {
//!                     Effect::FetchNthPrime { n } => {
//!                         tasks.spawn("nth_prime", async move {
//!                             Action::NthPrimeDidLoad { n, prime: lookup.nth_prime(n).await }
//!                         });
//!                     }
//!                 }
//!             }
//!         }
//!         // ... input handling
//!     }
//! }
//! ```

pub mod action;
pub mod effect;
pub mod logger;
pub mod reducer;
pub mod store;
#[cfg(feature = "tasks")]
pub mod tasks;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionCategory, ActionSummary};

// Reducer exports
pub use reducer::{
    combine, pullback, BoxedReducer, Combined, FieldLens, GetSetLens, Lens, MapOutput, Outcome,
    Pullback, Reducer, ReducerExt,
};

// Store exports
pub use store::{
    ComposedMiddleware, Middleware, NoopMiddleware, Store, StoreWithMiddleware, SubscriptionId,
};

// Effect exports
pub use effect::{DispatchResult, EffectStore};

// Logging exports
pub use logger::{ActionFilter, ActionHistory, ActionLoggerMiddleware, HistoryEntry};

// Task exports (requires "tasks" feature)
#[cfg(feature = "tasks")]
pub use tasks::{TaskKey, TaskManager};

// Testing exports
pub use testing::TestHarness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary};
    pub use crate::combine;
    pub use crate::effect::{DispatchResult, EffectStore};
    pub use crate::logger::{ActionFilter, ActionLoggerMiddleware};
    pub use crate::reducer::{
        pullback, FieldLens, GetSetLens, Lens, Outcome, Reducer, ReducerExt,
    };
    pub use crate::store::{
        ComposedMiddleware, Middleware, NoopMiddleware, Store, StoreWithMiddleware,
        SubscriptionId,
    };
    #[cfg(feature = "tasks")]
    pub use crate::tasks::{TaskKey, TaskManager};
}
