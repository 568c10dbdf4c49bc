//! Keyed async tasks that report back with actions
//!
//! Effects returned by a reducer are carried out as tokio tasks. Each task
//! resolves to one action, which is sent over the application's action
//! channel and dispatched by the main loop like any other action. The store
//! therefore stays the only writer of state.
//!
//! Tasks are keyed. Spawning under a key that is still running aborts the
//! earlier task, so a superseded request never reports back.
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! tasks.spawn("nth_prime", async move {
//!     let prime = lookup.nth_prime(n).await;
//!     Action::NthPrimeDidLoad { n, prime }
//! });
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Registry of running tasks by key.
///
/// Dropping the manager aborts every task it still tracks.
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> TaskManager<A> {
    /// `action_tx` receives the action each task resolves to.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any task already running under `key`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        if self.cancel(&key) {
            tracing::debug!(task = %key.name(), "superseded running task");
        }

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // The loop may already be gone on shutdown
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task under `key`. Returns `true` if one was still running.
    pub fn cancel(&mut self, key: &TaskKey) -> bool {
        match self.tasks.remove(key) {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    /// Abort every task.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task under `key` has been spawned and not yet finished.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Forget tasks that have completed.
    pub fn prune(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }

    /// Number of tracked tasks (finished ones count until pruned).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Loaded(u64),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Loaded"
        }
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<TestAction>) -> Option<TestAction> {
        tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .ok()
            .flatten()
    }

    #[test]
    fn test_task_key() {
        let a = TaskKey::new("lookup");
        let b: TaskKey = "lookup".into();
        let c = TaskKey::from(String::from("lookup"));

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.name(), "lookup");
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("lookup", async { TestAction::Loaded(13) });

        assert_eq!(recv(&mut rx).await, Some(TestAction::Loaded(13)));
    }

    #[tokio::test]
    async fn test_respawn_supersedes_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("lookup", async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            TestAction::Loaded(1)
        });
        tasks.spawn("lookup", async { TestAction::Loaded(2) });
        assert_eq!(tasks.len(), 1);

        assert_eq!(recv(&mut rx).await, Some(TestAction::Loaded(2)));
        // The first task was aborted and never reports
        assert_eq!(recv(&mut rx).await, None);
    }

    #[tokio::test]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("lookup", async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            TestAction::Loaded(1)
        });
        assert!(tasks.is_running(&TaskKey::new("lookup")));

        assert!(tasks.cancel(&TaskKey::new("lookup")));
        assert!(!tasks.is_running(&TaskKey::new("lookup")));
        assert!(!tasks.cancel(&TaskKey::new("lookup")));

        assert_eq!(recv(&mut rx).await, None);
    }

    #[tokio::test]
    async fn test_prune_forgets_finished() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("lookup", async { TestAction::Loaded(5) });
        assert!(recv(&mut rx).await.is_some());

        // Give the task a moment to be marked finished after sending
        tokio::time::sleep(Duration::from_millis(10)).await;
        tasks.prune();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Loaded(1)
        });
        tasks.spawn("b", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Loaded(2)
        });
        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_drop_aborts_outstanding_tasks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("lookup", async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            TestAction::Loaded(1)
        });
        drop(tasks);

        // The aborted task drops its sender, closing the channel unanswered
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(closed, Ok(None));
    }
}
