//! Feedback timer.
//!
//! Owns the single outstanding timer of a session. Dropping the timer
//! cancels it, so a torn-down session can never be committed to later.

use std::sync::Arc;
use std::time::Duration;

use lightheart_core::timer::{TimerScheduler, TimerToken};

/// Default length of the feedback window.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug)]
pub struct FeedbackTimer {
    scheduler: Arc<dyn TimerScheduler>,
    delay: Duration,
    pending: Option<TimerToken>,
}

impl FeedbackTimer {
    #[must_use]
    pub fn new(scheduler: Arc<dyn TimerScheduler>, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: None,
        }
    }

    /// Schedules the feedback window, replacing any outstanding timer.
    pub fn start(&mut self) -> TimerToken {
        self.cancel();
        let token = self.scheduler.schedule(self.delay);
        self.pending = Some(token);
        token
    }

    /// Consumes `token` if it is the outstanding timer.
    pub fn complete(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancels the outstanding timer, if any, and returns its token.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        let token = self.pending.take()?;
        self.scheduler.cancel(token);
        Some(token)
    }

    #[must_use]
    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        if let Some(token) = self.cancel() {
            tracing::debug!(%token, "cancelled feedback timer on teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightheart_test_support::ManualScheduler;

    #[test]
    fn test_complete_accepts_only_the_outstanding_token() {
        // Arrange
        let scheduler = Arc::new(ManualScheduler::new());
        let mut timer = FeedbackTimer::new(scheduler.clone(), DEFAULT_FEEDBACK_DELAY);
        let token = timer.start();

        // Act
        let stale = timer.complete(TimerToken::new(token.get() + 100));
        let fired = timer.complete(token);
        let repeated = timer.complete(token);

        // Assert
        assert!(!stale);
        assert!(fired);
        assert!(!repeated);
        assert_eq!(timer.pending(), None);
        assert_eq!(scheduler.scheduled(), vec![(token, Duration::from_millis(1500))]);
    }

    #[test]
    fn test_drop_cancels_outstanding_timer() {
        // Arrange
        let scheduler = Arc::new(ManualScheduler::new());
        let mut timer = FeedbackTimer::new(scheduler.clone(), DEFAULT_FEEDBACK_DELAY);
        let token = timer.start();

        // Act
        drop(timer);

        // Assert
        assert_eq!(scheduler.cancelled(), vec![token]);
        assert_eq!(scheduler.pending_count(), 0);
        assert!(scheduler.advance(DEFAULT_FEEDBACK_DELAY).is_empty());
    }

    #[test]
    fn test_drop_without_pending_timer_cancels_nothing() {
        let scheduler = Arc::new(ManualScheduler::new());
        let timer = FeedbackTimer::new(scheduler.clone(), DEFAULT_FEEDBACK_DELAY);

        drop(timer);

        assert!(scheduler.cancelled().is_empty());
    }
}
