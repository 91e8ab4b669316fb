//! Deferred execution for the async client twins.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// A blocking call submitted to the runtime's blocking pool. Await it to get
/// the call's result; a panic or cancellation surfaces as [`Error::Task`].
///
/// Must be created from within a tokio runtime.
#[must_use = "a Task does nothing useful unless awaited"]
#[derive(Debug)]
pub struct Task<T> {
    handle: JoinHandle<Result<T>>,
}

impl<T: Send + 'static> Task<T> {
    pub(crate) fn spawn<F>(call: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Self {
            handle: tokio::task::spawn_blocking(call),
        }
    }
}

impl<T> Task<T> {
    /// Cancels the task if it has not started running yet. A request already
    /// in flight runs to completion on the blocking pool.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for Task<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().handle)
            .poll(cx)
            .map(|joined| joined.unwrap_or_else(|err| Err(Error::Task(err))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_task_yields_call_result() {
        let task = Task::spawn(|| Ok(41 + 1));
        assert_eq!(task.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_task_propagates_call_error() {
        let task: Task<()> = Task::spawn(|| Err(Error::Config("boom".to_string())));
        let err = task.await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[tokio::test]
    async fn test_panicking_call_becomes_task_error() {
        let task: Task<()> = Task::spawn(|| panic!("transport exploded"));
        let err = task.await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Task);
    }
}
