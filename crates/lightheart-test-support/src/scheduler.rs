//! A `TimerScheduler` driven by virtual time.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use lightheart_core::timer::{TimerScheduler, TimerToken};

#[derive(Debug, Default)]
struct Inner {
    next_token: u64,
    now: Duration,
    pending: BTreeMap<TimerToken, Duration>,
    scheduled: Vec<(TimerToken, Duration)>,
    cancelled: Vec<TimerToken>,
}

/// A scheduler whose clock only moves when the test calls [`advance`].
///
/// Elapsed tokens are returned from `advance` for the test to hand to the
/// session, mirroring how the reader forwards them from its timer channel.
///
/// [`advance`]: ManualScheduler::advance
#[derive(Debug, Default)]
pub struct ManualScheduler {
    inner: Mutex<Inner>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves virtual time forward by `by` and returns the tokens that
    /// elapsed, earliest deadline first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn advance(&self, by: Duration) -> Vec<TimerToken> {
        let mut inner = self.inner.lock().unwrap();
        inner.now += by;
        let now = inner.now;

        let mut due: Vec<(Duration, TimerToken)> = inner
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(token, deadline)| (*deadline, *token))
            .collect();
        due.sort();
        for (_, token) in &due {
            inner.pending.remove(token);
        }
        due.into_iter().map(|(_, token)| token).collect()
    }

    /// Every `schedule` call as `(token, delay)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn scheduled(&self) -> Vec<(TimerToken, Duration)> {
        self.inner.lock().unwrap().scheduled.clone()
    }

    /// Every token passed to `cancel`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn cancelled(&self) -> Vec<TimerToken> {
        self.inner.lock().unwrap().cancelled.clone()
    }

    /// Number of timers that have neither elapsed nor been cancelled.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration) -> TimerToken {
        let mut inner = self.inner.lock().unwrap();
        inner.next_token += 1;
        let token = TimerToken::new(inner.next_token);
        let deadline = inner.now + delay;
        inner.pending.insert(token, deadline);
        inner.scheduled.push((token, delay));
        token
    }

    fn cancel(&self, token: TimerToken) {
        let mut inner = self.inner.lock().unwrap();
        inner.pending.remove(&token);
        inner.cancelled.push(token);
    }
}
