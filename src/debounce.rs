//!
//! Deferred values without threads.
//!
//! [Debounce] holds back a value until a quiet period has passed.
//! Each new value replaces the pending one and restarts the
//! period. The host polls with the current time.
//!
//! [Deferred] is the zero-delay variant. The value is taken by the
//! next render or event-handler, a newer value replaces an older one.
//!

use std::time::{Duration, Instant};

/// Default delay for end-date edits.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Last-write-wins delayed value.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a value. Replaces any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time until the pending value is due.
    pub fn sleep_time(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(due, _)| due.saturating_duration_since(now))
    }

    /// Returns the value if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }
}

/// Zero-delay deferred value.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    value: Option<T>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Deferred<T> {
    /// Replaces any queued value.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn cancel(&mut self) {
        self.value = None;
    }

    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}
