//! Effect-emitting reducers
//!
//! A reducer that needs the outside world (an HTTP lookup, a timer) does not
//! do the work itself. It returns a [`DispatchResult`] carrying declarative
//! effects, and the application loop turns those effects into async tasks
//! whose results come back as actions.
//!
//! ```ignore
//! fn reducer(state: &mut State, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::NthPrimeFetch => {
//!             state.in_flight = true;
//!             DispatchResult::changed_with(Effect::FetchNthPrime { n: state.count })
//!         }
//!         Action::NthPrimeDidLoad(prime) => {
//!             state.in_flight = false;
//!             state.prime = prime;
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//!
//! let mut store = EffectStore::new(State::default(), reducer);
//! for effect in store.dispatch(Action::NthPrimeFetch).effects {
//!     // spawn a task
//! }
//! ```

use crate::reducer::Outcome;
use crate::store::Store;

/// Result of dispatching an action to an effect reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch, in emission order.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Convert every effect, e.g. from a feature's effect type to the
    /// application's.
    pub fn map_effects<F, T>(self, f: F) -> DispatchResult<T>
    where
        F: FnMut(E) -> T,
    {
        DispatchResult {
            changed: self.changed,
            effects: self.effects.into_iter().map(f).collect(),
        }
    }
}

impl<E> From<bool> for DispatchResult<E> {
    /// Lift a plain reducer's "changed" flag.
    fn from(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }
}

impl<E> Outcome for DispatchResult<E> {
    #[inline]
    fn unchanged() -> Self {
        DispatchResult::unchanged()
    }

    fn merge(&mut self, other: Self) {
        self.changed |= other.changed;
        self.effects.extend(other.effects);
    }

    #[inline]
    fn is_changed(&self) -> bool {
        self.changed
    }
}

/// A store whose reducer returns [`DispatchResult<E>`].
pub type EffectStore<S, A, E> = Store<S, A, DispatchResult<E>>;
