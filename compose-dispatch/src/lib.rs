//! compose-dispatch: Centralized state management with composable reducers
//!
//! Like Redux/Elm, but built from small reducers. Each feature owns a reducer
//! over its slice of state and its family of actions; `pullback` lifts it to
//! the application, and `combine!` joins the lifted reducers into the one
//! reducer the [`Store`] runs.
//!
//! # Example
//! ```ignore
//! use compose_dispatch::prelude::*;
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
//!     Quit,
//! }
//! ```

// Re-export everything from core
pub use compose_dispatch_core::*;

// Re-export derive macros
pub use compose_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use compose_dispatch_core::{Action, ActionCategory, ActionSummary};

    // Reducers
    pub use compose_dispatch_core::combine;
    pub use compose_dispatch_core::{
        pullback, FieldLens, GetSetLens, Lens, Outcome, Reducer, ReducerExt,
    };

    // Store
    pub use compose_dispatch_core::{
        ComposedMiddleware, DispatchResult, EffectStore, Middleware, NoopMiddleware, Store,
        StoreWithMiddleware, SubscriptionId,
    };

    // Logging
    pub use compose_dispatch_core::{ActionFilter, ActionLoggerMiddleware};

    // Tasks
    #[cfg(feature = "tasks")]
    pub use compose_dispatch_core::{TaskKey, TaskManager};

    // Derive macros
    pub use compose_dispatch_macros::Action;
}
