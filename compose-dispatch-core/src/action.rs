//! Action traits for type-safe state mutations

use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or handed to several reducers
/// - Debug: For debugging and logging
/// - Send + 'static: Async tasks send result actions back over a channel
///
/// Use `#[derive(Action)]` from `compose-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Actions grouped into categories.
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
/// Nested action families (`#[action(nested)]` variants) are categorized by
/// the variant that wraps them.
pub trait ActionCategory: Action {
    /// Category enum generated for the action type
    type Category: Copy + Eq + Hash + Debug;

    /// Category name, if the action belongs to one
    fn category(&self) -> Option<&'static str>;

    /// Category as an enum value
    fn category_enum(&self) -> Self::Category;
}

/// Short, human-readable description of an action for logs.
///
/// The default uses the `Debug` output. Override it for actions that carry
/// large payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
