//! Tokio implementation of the `TimerScheduler` trait.
//!
//! Each timer is a spawned sleep that sends its token on an unbounded
//! channel. Cancelling aborts the task. A token that was already sent before
//! the abort is still delivered; the session rejects it as stale.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lightheart_core::timer::{TimerScheduler, TimerToken};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Timer scheduler backed by the tokio runtime it was created on.
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: Handle,
    sender: mpsc::UnboundedSender<TimerToken>,
    next_token: AtomicU64,
    tasks: Mutex<HashMap<TimerToken, JoinHandle<()>>>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver elapsed tokens arrive on.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerToken>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            runtime: Handle::current(),
            sender,
            next_token: AtomicU64::new(1),
            tasks: Mutex::new(HashMap::new()),
        };
        (scheduler, receiver)
    }

    /// Number of timer tasks that have not finished.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .filter(|task| !task.is_finished())
            .count()
    }
}

impl TimerScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration) -> TimerToken {
        let token = TimerToken::new(self.next_token.fetch_add(1, Ordering::Relaxed));
        let sender = self.sender.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the reader has shut down.
            let _ = sender.send(token);
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(token, task);
        token
    }

    fn cancel(&self, token: TimerToken) {
        let task = self
            .tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&token);
        if let Some(task) = task {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(std::sync::PoisonError::into_inner);
        for (_, task) in tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_token_is_delivered_after_delay() {
        // Arrange
        let (scheduler, mut receiver) = TokioScheduler::new();

        // Act
        let token = scheduler.schedule(Duration::from_millis(1500));
        tokio::time::sleep(Duration::from_millis(1499)).await;
        let early = receiver.try_recv();
        let delivered = receiver.recv().await;

        // Assert
        assert!(early.is_err());
        assert_eq!(delivered, Some(token));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_delivers() {
        // Arrange
        let (scheduler, mut receiver) = TokioScheduler::new();
        let token = scheduler.schedule(Duration::from_millis(1500));

        // Act
        scheduler.cancel(token);
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Assert
        assert!(receiver.try_recv().is_err());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokens_are_unique() {
        let (scheduler, _receiver) = TokioScheduler::new();

        let first = scheduler.schedule(Duration::from_millis(10));
        let second = scheduler.schedule(Duration::from_millis(10));

        assert_ne!(first, second);
    }
}
