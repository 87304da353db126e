//! Fan-out/join over independent tasks.

use std::collections::BTreeSet;
use std::future::Future;

use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use tokio::task::JoinError;

type Completion<T, E> = BoxFuture<'static, (usize, Result<Result<T, E>, JoinError>)>;

/// A set of spawned tasks that either all succeed or report one failure.
///
/// The reported failure is the one from the lowest spawn index, regardless
/// of which task finished first.
pub struct TaskGroup<T, E> {
    tasks: FuturesUnordered<Completion<T, E>>,
    spawned: usize,
}

impl<T, E> TaskGroup<T, E>
where
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            tasks: FuturesUnordered::new(),
            spawned: 0,
        }
    }

    /// Spawn `task` onto the runtime.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let index = self.spawned;
        self.spawned += 1;
        let handle = tokio::spawn(task);
        self.tasks.push(handle.map(move |joined| (index, joined)).boxed());
    }

    pub fn len(&self) -> usize {
        self.spawned
    }

    pub fn is_empty(&self) -> bool {
        self.spawned == 0
    }

    /// Wait for every task, or for the failure set to be decided.
    pub async fn wait(mut self) -> Result<Vec<T>, E> {
        let mut results: Vec<Option<T>> = (0..self.spawned).map(|_| None).collect();
        let mut pending: BTreeSet<usize> = (0..self.spawned).collect();
        let mut failure: Option<(usize, E)> = None;

        while let Some((index, joined)) = self.tasks.next().await {
            pending.remove(&index);
            match joined.map_err(E::from).and_then(|outcome| outcome) {
                Ok(value) => results[index] = Some(value),
                Err(err) => {
                    let lower = failure.as_ref().map_or(true, |(first, _)| index < *first);
                    if lower {
                        tracing::debug!(task = index, "task failed");
                        failure = Some((index, err));
                    }
                }
            }

            if let Some((first, _)) = &failure {
                if pending.range(..*first).next().is_none() {
                    break;
                }
            }
        }

        // Dropping the remaining join handles detaches their tasks.
        if let Some((_, err)) = failure {
            return Err(err);
        }
        Ok(results.into_iter().flatten().collect())
    }
}

impl<T, E> Default for TaskGroup<T, E>
where
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Failed(usize),
        Panicked,
    }

    impl From<JoinError> for TestError {
        fn from(_: JoinError) -> Self {
            TestError::Panicked
        }
    }

    #[tokio::test]
    async fn test_results_come_back_in_spawn_order() {
        let mut group: TaskGroup<usize, TestError> = TaskGroup::new();
        for i in 0..8 {
            group.spawn(async move {
                tokio::time::sleep(Duration::from_millis(((8 - i) * 5) as u64)).await;
                Ok(i)
            });
        }
        assert_eq!(group.len(), 8);
        assert_eq!(group.wait().await.unwrap(), (0..8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_empty_group_succeeds() {
        let group: TaskGroup<(), TestError> = TaskGroup::new();
        assert!(group.is_empty());
        assert!(group.wait().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lowest_index_failure_wins() {
        let mut group: TaskGroup<(), TestError> = TaskGroup::new();
        group.spawn(async { Ok(()) });
        group.spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err(TestError::Failed(1))
        });
        group.spawn(async { Err(TestError::Failed(2)) });
        assert_eq!(group.wait().await, Err(TestError::Failed(1)));
    }

    #[tokio::test]
    async fn test_failure_does_not_wait_for_higher_indices() {
        let finished = Arc::new(AtomicBool::new(false));
        let slow = finished.clone();

        let mut group: TaskGroup<(), TestError> = TaskGroup::new();
        group.spawn(async { Err(TestError::Failed(0)) });
        group.spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            slow.store(true, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(group.wait().await, Err(TestError::Failed(0)));
        assert!(!finished.load(Ordering::SeqCst));

        // Detached, not cancelled.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panic_becomes_error() {
        let mut group: TaskGroup<(), TestError> = TaskGroup::new();
        group.spawn(async { panic!("boom") });
        assert_eq!(group.wait().await, Err(TestError::Panicked));
    }
}
