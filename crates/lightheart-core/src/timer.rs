//! Cancelable one-shot timer abstraction.
//!
//! A scheduler does not call back into the session. When a timer elapses the
//! implementation hands its token to whoever drives the session (a channel in
//! the reader, a manual `advance` in tests), and the driver passes it to the
//! session's fire handler.

use std::fmt;
use std::time::Duration;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Wraps a raw token value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Schedules one-shot timers and cancels them.
pub trait TimerScheduler: Send + Sync + fmt::Debug {
    /// Schedules a timer that elapses after `delay`.
    fn schedule(&self, delay: Duration) -> TimerToken;

    /// Cancels a timer. Cancelling an elapsed or unknown token is a no-op.
    fn cancel(&self, token: TimerToken);
}
