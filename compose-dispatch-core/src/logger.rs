//! Action logging middleware
//!
//! [`ActionLoggerMiddleware`] reports every dispatched action through
//! `tracing` and can keep the most recent ones in an [`ActionHistory`] ring
//! buffer. Which actions are logged is decided by an [`ActionFilter`] built
//! from glob patterns over [`Action::name`](crate::Action::name).
//!
//! # Example
//!
//! ```ignore
//! use compose_dispatch::logger::{ActionFilter, ActionLoggerMiddleware};
//!
//! // Everything except the noisy favorites deletes, history of 50 entries
//! let filter = ActionFilter::new(None, Some("FavoritePrimesDelete*"));
//! let middleware = ActionLoggerMiddleware::new(filter)
//!     .with_history(50)
//!     .active(args.log_actions);
//!
//! let mut store = StoreWithMiddleware::new(AppState::default(), app_reducer, middleware);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::action::ActionSummary;
use crate::store::Middleware;

/// Include/exclude glob patterns over action names.
///
/// - `*` matches any run of characters (including none)
/// - `?` matches exactly one character
/// - anything else matches itself
///
/// An empty include list admits every name. Excludes are checked after
/// includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ActionFilter {
    /// Build a filter from comma-separated pattern lists.
    ///
    /// ```
    /// use compose_dispatch_core::logger::ActionFilter;
    ///
    /// let filter = ActionFilter::new(Some("Count*, FavoriteSave"), Some("CountDecrement"));
    /// assert!(filter.admits("CountIncrement"));
    /// assert!(filter.admits("FavoriteSave"));
    /// assert!(!filter.admits("CountDecrement"));
    /// assert!(!filter.admits("FavoriteRemove"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.map(split_patterns).unwrap_or_default(),
            exclude: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// A filter that admits every action.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether an action with this name should be logged
    pub fn admits(&self, action_name: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| glob_match(p, action_name));
        included && !self.exclude.iter().any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Glob match supporting `*` and `?`.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen and the text index it is currently
    // matched up to; used to backtrack.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// One logged action.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Action name (from `Action::name()`)
    pub name: &'static str,
    /// From `ActionSummary::summary()`
    pub summary: String,
    /// Monotonic position among logged actions, starting at 0
    pub sequence: u64,
    /// When the action was logged
    pub logged_at: Instant,
    /// Filled in once the reducer has run
    pub state_changed: Option<bool>,
}

impl HistoryEntry {
    pub fn elapsed(&self) -> Duration {
        self.logged_at.elapsed()
    }
}

/// Fixed-capacity buffer of the most recent logged actions.
#[derive(Debug, Clone)]
pub struct ActionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl ActionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Record an action, evicting the oldest entry when full.
    ///
    /// A zero-capacity history keeps nothing and returns `None`.
    pub fn record<A: ActionSummary>(&mut self, action: &A) -> Option<&HistoryEntry> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        if self.capacity == 0 {
            return None;
        }

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            name: action.name(),
            summary: action.summary(),
            sequence,
            logged_at: Instant::now(),
            state_changed: None,
        });
        self.entries.back()
    }

    fn mark_last(&mut self, state_changed: bool) {
        if let Some(entry) = self.entries.back_mut() {
            entry.state_changed = Some(state_changed);
        }
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent `count` entries, newest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Middleware that logs admitted actions via `tracing::debug!` and,
/// optionally, into an [`ActionHistory`].
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    filter: ActionFilter,
    history: Option<ActionHistory>,
    /// Whether the in-flight action passed the filter
    pending: bool,
    active: bool,
}

impl ActionLoggerMiddleware {
    /// Tracing only, no history
    pub fn new(filter: ActionFilter) -> Self {
        Self {
            filter,
            history: None,
            pending: false,
            active: true,
        }
    }

    /// Log every action
    pub fn log_all() -> Self {
        Self::new(ActionFilter::all())
    }

    /// Also keep the last `capacity` admitted actions.
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history = Some(ActionHistory::new(capacity));
        self
    }

    /// Turn the middleware on or off; when off, every hook is a no-op.
    ///
    /// ```ignore
    /// let middleware = ActionLoggerMiddleware::log_all().active(args.log_actions);
    /// ```
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn filter(&self) -> &ActionFilter {
        &self.filter
    }

    pub fn history(&self) -> Option<&ActionHistory> {
        self.history.as_ref()
    }
}

impl<A: ActionSummary> Middleware<A> for ActionLoggerMiddleware {
    fn before(&mut self, action: &A) {
        self.pending = self.active && self.filter.admits(action.name());
        if !self.pending {
            return;
        }

        tracing::debug!(action = %action.name(), summary = %action.summary(), "dispatch");
        if let Some(history) = self.history.as_mut() {
            history.record(action);
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if !self.pending {
            return;
        }
        self.pending = false;

        tracing::trace!(action = %action.name(), state_changed, "reduced");
        if let Some(history) = self.history.as_mut() {
            history.mark_last(state_changed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_exact() {
        assert!(glob_match("CountIncrement", "CountIncrement"));
        assert!(!glob_match("CountIncrement", "CountDecrement"));
        assert!(!glob_match("Count", "CountIncrement"));
    }

    #[test]
    fn test_glob_star() {
        assert!(glob_match("Count*", "CountIncrement"));
        assert!(glob_match("Count*", "Count"));
        assert!(glob_match("*Did*", "NthPrimeDidLoad"));
        assert!(glob_match("*Save", "FavoriteSave"));
        assert!(!glob_match("*Save", "FavoriteSaved"));
        assert!(glob_match("Nth*Load", "NthPrimeDidLoad"));
        assert!(glob_match("**", ""));
    }

    #[test]
    fn test_glob_question() {
        assert!(glob_match("Fav?rite*", "FavoriteSave"));
        assert!(!glob_match("Count?", "Count"));
    }

    #[test]
    fn test_filter_include_and_exclude() {
        let filter = ActionFilter::new(Some("Favorite*"), Some("*Remove"));
        assert!(filter.admits("FavoriteSave"));
        assert!(!filter.admits("FavoriteRemove"));
        assert!(!filter.admits("CountIncrement"));
    }

    #[test]
    fn test_filter_ignores_blank_patterns() {
        let filter = ActionFilter::new(Some(" , "), Some(""));
        assert_eq!(filter, ActionFilter::all());
        assert!(filter.admits("Anything"));
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Save(i64),
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::Save(_) => "Save",
            }
        }
    }

    impl ActionSummary for TestAction {
        fn summary(&self) -> String {
            match self {
                TestAction::Increment => "Increment".to_string(),
                TestAction::Save(prime) => format!("Save({})", prime),
            }
        }
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = ActionHistory::new(2);
        history.record(&TestAction::Increment);
        history.record(&TestAction::Save(3));
        history.record(&TestAction::Increment);

        assert_eq!(history.len(), 2);
        let sequences: Vec<u64> = history.entries().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);

        let newest = history.recent(1).next().unwrap();
        assert_eq!(newest.name, "Increment");
    }

    #[test]
    fn test_zero_capacity_history_keeps_nothing() {
        let mut history = ActionHistory::new(0);
        for _ in 0..1000 {
            assert!(history.record(&TestAction::Increment).is_none());
        }
        assert!(history.is_empty());

        let mut middleware = ActionLoggerMiddleware::log_all().with_history(0);
        middleware.before(&TestAction::Save(2));
        middleware.after(&TestAction::Save(2), true);
        assert!(middleware.history().unwrap().is_empty());
    }

    #[test]
    fn test_history_sequence_survives_eviction() {
        let mut history = ActionHistory::new(1);
        for prime in [2, 3, 5] {
            history.record(&TestAction::Save(prime));
        }

        assert_eq!(history.len(), 1);
        let entry = history.entries().next().unwrap();
        assert_eq!(entry.sequence, 2);
        assert_eq!(entry.summary, "Save(5)");
    }

    #[test]
    fn test_middleware_records_state_changed() {
        let mut middleware = ActionLoggerMiddleware::new(ActionFilter::new(None, Some("Increment")))
            .with_history(10);

        middleware.before(&TestAction::Save(7));
        middleware.after(&TestAction::Save(7), true);

        // Filtered out: must not touch the Save entry
        middleware.before(&TestAction::Increment);
        middleware.after(&TestAction::Increment, false);

        let history = middleware.history().unwrap();
        assert_eq!(history.len(), 1);
        let entry = history.entries().next().unwrap();
        assert_eq!(entry.summary, "Save(7)");
        assert_eq!(entry.state_changed, Some(true));
    }

    #[test]
    fn test_inactive_middleware_records_nothing() {
        let mut middleware = ActionLoggerMiddleware::log_all().with_history(10).active(false);

        middleware.before(&TestAction::Save(1));
        middleware.after(&TestAction::Save(1), true);

        assert!(middleware.history().unwrap().is_empty());
    }
}
