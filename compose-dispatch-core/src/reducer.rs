//! Reducers and the combinators that compose them
//!
//! A reducer mutates state in place for one action and reports what happened
//! through an [`Outcome`]: `bool` for plain reducers ("did state change?") or
//! [`DispatchResult<E>`](crate::DispatchResult) for reducers that also
//! declare effects.
//!
//! Large applications are built from small reducers:
//!
//! - [`combine`] / [`combine!`](crate::combine) runs several reducers over the
//!   same state and action, in declaration order.
//! - [`pullback`] lifts a reducer written against a slice of the state and one
//!   family of actions into a reducer over the whole application.
//!
//! # Example
//!
//! ```ignore
//! use compose_dispatch::reducer::{pullback, FieldLens};
//! use compose_dispatch::combine;
//!
//! fn counter(count: &mut i64, action: CounterAction) -> bool { /* ... */ }
//! fn todos(list: &mut Vec<String>, action: TodoAction) -> bool { /* ... */ }
//!
//! let app = combine![
//!     pullback(counter, FieldLens::new(|s: &mut AppState| &mut s.count), AppAction::counter),
//!     pullback(todos, FieldLens::new(|s: &mut AppState| &mut s.todos), AppAction::todos),
//! ];
//! ```

use std::fmt;
use std::marker::PhantomData;

/// What a reducer reports back after handling an action.
pub trait Outcome {
    /// The outcome of a reducer that ignored the action.
    fn unchanged() -> Self;

    /// Fold the outcome of a later reducer into this one.
    fn merge(&mut self, other: Self);

    /// Whether observers need to hear about the new state.
    fn is_changed(&self) -> bool;
}

impl Outcome for bool {
    #[inline]
    fn unchanged() -> Self {
        false
    }

    #[inline]
    fn merge(&mut self, other: Self) {
        *self |= other;
    }

    #[inline]
    fn is_changed(&self) -> bool {
        *self
    }
}

/// A state transition: mutate `state` for `action`.
///
/// Implemented for every `Fn(&mut S, A) -> O` where `O: Outcome`, so plain
/// functions are reducers:
///
/// ```ignore
/// fn reducer(state: &mut AppState, action: AppAction) -> bool { ... }
/// ```
///
/// Reducers must be total: an action they do not care about is a no-op that
/// returns [`Outcome::unchanged`].
pub trait Reducer<S, A> {
    type Output: Outcome;

    fn reduce(&self, state: &mut S, action: A) -> Self::Output;
}

impl<S, A, O, F> Reducer<S, A> for F
where
    F: Fn(&mut S, A) -> O,
    O: Outcome,
{
    type Output = O;

    #[inline]
    fn reduce(&self, state: &mut S, action: A) -> O {
        self(state, action)
    }
}

/// A type-erased reducer.
pub type BoxedReducer<S, A, O> = Box<dyn Reducer<S, A, Output = O>>;

// ============================================================================
// combine
// ============================================================================

/// Several reducers run as one.
///
/// Every reducer sees the same action and the state as left by the reducers
/// before it. Outcomes are merged in the same order.
pub struct Combined<S, A, O = bool> {
    reducers: Vec<BoxedReducer<S, A, O>>,
}

impl<S, A, O> Combined<S, A, O> {
    /// An empty combination; reduces every action to [`Outcome::unchanged`].
    pub fn new() -> Self {
        Self {
            reducers: Vec::new(),
        }
    }

    /// Append a reducer. It runs after every reducer added before it.
    pub fn with<R>(mut self, reducer: R) -> Self
    where
        R: Reducer<S, A, Output = O> + 'static,
    {
        self.reducers.push(Box::new(reducer));
        self
    }

    /// Number of component reducers
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, O> Default for Combined<S, A, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A, O> fmt::Debug for Combined<S, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combined")
            .field("reducers_count", &self.reducers.len())
            .finish()
    }
}

impl<S, A, O> From<Vec<BoxedReducer<S, A, O>>> for Combined<S, A, O> {
    fn from(reducers: Vec<BoxedReducer<S, A, O>>) -> Self {
        Self { reducers }
    }
}

impl<S, A, O> Reducer<S, A> for Combined<S, A, O>
where
    A: Clone,
    O: Outcome,
{
    type Output = O;

    fn reduce(&self, state: &mut S, action: A) -> O {
        let mut outcome = O::unchanged();
        for reducer in &self.reducers {
            outcome.merge(reducer.reduce(state, action.clone()));
        }
        outcome
    }
}

/// Combine boxed reducers into one, preserving their order.
///
/// See [`combine!`](crate::combine) for the unboxed form.
pub fn combine<S, A, O>(reducers: Vec<BoxedReducer<S, A, O>>) -> Combined<S, A, O> {
    Combined::from(reducers)
}

/// Combine reducers into one, in the order given.
///
/// ```ignore
/// let app = combine![counter_reducer, favorites_reducer];
/// ```
#[macro_export]
macro_rules! combine {
    ($($reducer:expr),* $(,)?) => {
        $crate::reducer::Combined::new()$(.with($reducer))*
    };
}

// ============================================================================
// Lenses
// ============================================================================

/// Bidirectional access from a global state `G` to a local slice `L`.
pub trait Lens<G, L> {
    /// Run `f` against the slice of `global`, writing any change back.
    fn modify<R>(&self, global: &mut G, f: impl FnOnce(&mut L) -> R) -> R;
}

/// A lens over a single field, borrowed in place.
pub struct FieldLens<G, L> {
    project: fn(&mut G) -> &mut L,
}

impl<G, L> FieldLens<G, L> {
    pub fn new(project: fn(&mut G) -> &mut L) -> Self {
        Self { project }
    }
}

impl<G, L> Lens<G, L> for FieldLens<G, L> {
    #[inline]
    fn modify<R>(&self, global: &mut G, f: impl FnOnce(&mut L) -> R) -> R {
        f((self.project)(global))
    }
}

/// A lens built from a getter and a setter.
///
/// The getter copies the slice out of the global state, the reducer works on
/// the copy, and the setter writes it back. Use it for views that gather
/// several fields into one struct.
pub struct GetSetLens<G, L> {
    get: fn(&G) -> L,
    set: fn(&mut G, L),
}

impl<G, L> GetSetLens<G, L> {
    pub fn new(get: fn(&G) -> L, set: fn(&mut G, L)) -> Self {
        Self { get, set }
    }
}

impl<G, L> Lens<G, L> for GetSetLens<G, L> {
    fn modify<R>(&self, global: &mut G, f: impl FnOnce(&mut L) -> R) -> R {
        let mut local = (self.get)(global);
        let result = f(&mut local);
        (self.set)(global, local);
        result
    }
}

// ============================================================================
// pullback
// ============================================================================

/// A local reducer lifted to global state and actions. See [`pullback`].
pub struct Pullback<R, LS, LA, L, X> {
    reducer: R,
    lens: L,
    extract: X,
    _local: PhantomData<fn(&mut LS, LA)>,
}

impl<GS, GA, LS, LA, R, L, X> Reducer<GS, GA> for Pullback<R, LS, LA, L, X>
where
    R: Reducer<LS, LA>,
    L: Lens<GS, LS>,
    X: Fn(GA) -> Option<LA>,
{
    type Output = R::Output;

    fn reduce(&self, state: &mut GS, action: GA) -> Self::Output {
        let Some(local_action) = (self.extract)(action) else {
            return R::Output::unchanged();
        };
        self.lens
            .modify(state, |local| self.reducer.reduce(local, local_action))
    }
}

/// Lift a reducer over `(LS, LA)` into one over `(GS, GA)`.
///
/// - `lens` reaches the local state inside the global state.
/// - `extract` narrows a global action to the local family; `None` makes the
///   lifted reducer a no-op for that dispatch.
///
/// Only the slice reachable through `lens` is ever mutated, so pullbacks over
/// disjoint slices can be combined in any order.
pub fn pullback<GS, GA, LS, LA, R, L, X>(
    reducer: R,
    lens: L,
    extract: X,
) -> Pullback<R, LS, LA, L, X>
where
    R: Reducer<LS, LA>,
    L: Lens<GS, LS>,
    X: Fn(GA) -> Option<LA>,
{
    Pullback {
        reducer,
        lens,
        extract,
        _local: PhantomData,
    }
}

// ============================================================================
// Output mapping
// ============================================================================

/// A reducer whose outcome is converted by a function. See
/// [`ReducerExt::map_output`].
pub struct MapOutput<R, F> {
    reducer: R,
    map: F,
}

impl<S, A, O, R, F> Reducer<S, A> for MapOutput<R, F>
where
    R: Reducer<S, A>,
    F: Fn(R::Output) -> O,
    O: Outcome,
{
    type Output = O;

    #[inline]
    fn reduce(&self, state: &mut S, action: A) -> O {
        (self.map)(self.reducer.reduce(state, action))
    }
}

/// Combinator methods for every reducer.
pub trait ReducerExt<S, A>: Reducer<S, A> + Sized {
    /// Method form of [`pullback`].
    fn pullback<GS, GA, L, X>(self, lens: L, extract: X) -> Pullback<Self, S, A, L, X>
    where
        L: Lens<GS, S>,
        X: Fn(GA) -> Option<A>,
    {
        pullback(self, lens, extract)
    }

    /// Convert the outcome, e.g. a `bool` reducer into an effect reducer:
    ///
    /// ```ignore
    /// favorites_reducer.map_output(DispatchResult::<Effect>::from)
    /// ```
    fn map_output<O, F>(self, map: F) -> MapOutput<Self, F>
    where
        F: Fn(Self::Output) -> O,
        O: Outcome,
    {
        MapOutput { reducer: self, map }
    }

    /// Erase the reducer's type.
    fn boxed(self) -> BoxedReducer<S, A, Self::Output>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<S, A, R: Reducer<S, A>> ReducerExt<S, A> for R {}
