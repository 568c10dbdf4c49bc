//! Centralized state store with reducer pattern

use std::fmt;
use std::marker::PhantomData;

use crate::reducer::{BoxedReducer, Outcome, Reducer};
use crate::Action;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<S> = Box<dyn FnMut(&S)>;

/// Centralized state store with Redux-like reducer pattern
///
/// The store owns the application state and the reducer that transitions it.
/// [`dispatch`](Store::dispatch) is the only way to change the state; every
/// dispatch whose outcome reports a change is followed by a notification to
/// each subscribed observer, in subscription order.
///
/// Dispatch takes `&mut self` and observers only ever see `&S`, so an
/// observer cannot dispatch while a dispatch is running. Observers that need
/// to react with a new action should send it over a channel that the
/// application loop drains.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `O` - The reducer outcome: `bool`, or `DispatchResult<E>` for effects
///
/// # Example
/// ```ignore
/// fn reducer(state: &mut AppState, action: AppAction) -> bool {
///     match action {
///         AppAction::Increment => { state.counter += 1; true }
///         AppAction::Decrement => { state.counter -= 1; true }
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// store.subscribe(|state| println!("counter = {}", state.counter));
/// store.dispatch(AppAction::Increment);
/// assert_eq!(store.state().counter, 1);
/// ```
pub struct Store<S, A, O = bool> {
    state: S,
    reducer: BoxedReducer<S, A, O>,
    observers: Vec<(SubscriptionId, Observer<S>)>,
    next_subscription: u64,
    _marker: PhantomData<A>,
}

impl<S, A, O> Store<S, A, O>
where
    A: Action,
    O: Outcome,
{
    /// Create a new store with initial state and reducer
    pub fn new<R>(state: S, reducer: R) -> Self
    where
        R: Reducer<S, A, Output = O> + 'static,
    {
        Self {
            state,
            reducer: Box::new(reducer),
            observers: Vec::new(),
            next_subscription: 0,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// The reducer runs against the current state in place. Observers are
    /// notified if the outcome reports a change. The outcome is returned so
    /// the caller can re-render or process effects.
    pub fn dispatch(&mut self, action: A) -> O {
        let outcome = self.reducer.reduce(&mut self.state, action);
        if outcome.is_changed() {
            for (_, observer) in &mut self.observers {
                observer(&self.state);
            }
        }
        outcome
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Register an observer called with the new state after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&S) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Number of subscribed observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<S: fmt::Debug, A, O> fmt::Debug for Store<S, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and lets middleware see every action before and after
/// the reducer runs.
pub struct StoreWithMiddleware<S, A, M, O = bool> {
    store: Store<S, A, O>,
    middleware: M,
}

impl<S, A, M, O> StoreWithMiddleware<S, A, M, O>
where
    A: Action,
    M: Middleware<A>,
    O: Outcome,
{
    /// Create a new store with middleware
    pub fn new<R>(state: S, reducer: R, middleware: M) -> Self
    where
        R: Reducer<S, A, Output = O> + 'static,
    {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> O {
        self.middleware.before(&action);
        let outcome = self.store.dispatch(action.clone());
        self.middleware.after(&action, outcome.is_changed());
        outcome
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// See [`Store::subscribe`]
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&S) + 'static,
    {
        self.store.subscribe(observer)
    }

    /// See [`Store::unsubscribe`]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, auditing, or other cross-cutting
/// concerns to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Compose multiple middleware into a single middleware
pub struct ComposedMiddleware<A: Action> {
    middlewares: Vec<Box<dyn Middleware<A>>>,
}

impl<A: Action> fmt::Debug for ComposedMiddleware<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<A: Action> Default for ComposedMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> ComposedMiddleware<A> {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<A> + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }
}

impl<A: Action> Middleware<A> for ComposedMiddleware<A> {
    fn before(&mut self, action: &A) {
        for middleware in &mut self.middlewares {
            middleware.before(action);
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        // Reverse order so hooks nest
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.after(action, state_changed);
        }
    }
}
