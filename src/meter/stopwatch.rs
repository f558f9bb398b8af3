//! Cooperative wall-clock limit
//!
//! Algorithms call `check` at bounded intervals (once per outer loop or
//! recursive call); the policy decides whether the elapsed time is still
//! acceptable. There is no preemption.

use std::cell::Cell;
use std::fmt;
use std::time::{Duration, Instant};

use super::{MeterError, Resource, Unbounded};

/// Policy consulted on every stopwatch check.
pub trait StopwatchPolicy {
    /// Inspect the elapsed time; an error interrupts the caller.
    fn on_check(&self, started: bool, elapsed: Duration) -> Result<(), MeterError>;
}

impl StopwatchPolicy for Unbounded {
    fn on_check(&self, _started: bool, _elapsed: Duration) -> Result<(), MeterError> {
        Ok(())
    }
}

/// Fails a check once a running stopwatch has exceeded the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimit(pub Duration);

impl StopwatchPolicy for TimeLimit {
    fn on_check(&self, started: bool, elapsed: Duration) -> Result<(), MeterError> {
        if started && elapsed > self.0 {
            return Err(MeterError::LimitExceeded {
                resource: Resource::Time,
                limit: self.0.as_millis() as u64,
            });
        }
        Ok(())
    }
}

/// Start/stop timer with an injected check policy.
pub struct Stopwatch {
    started_at: Cell<Option<Instant>>,
    stored: Cell<Duration>,
    policy: Box<dyn StopwatchPolicy>,
}

impl Stopwatch {
    /// Stopwatch whose checks never fail.
    pub fn new() -> Self {
        Self::with_policy(Unbounded)
    }

    /// Stopwatch whose checks are decided by `policy`.
    pub fn with_policy(policy: impl StopwatchPolicy + 'static) -> Self {
        Self {
            started_at: Cell::new(None),
            stored: Cell::new(Duration::ZERO),
            policy: Box::new(policy),
        }
    }

    /// Start or restart timing.
    pub fn start(&self) {
        self.started_at.set(Some(Instant::now()));
    }

    /// Stop timing and keep the elapsed time.
    pub fn stop(&self) {
        self.stored.set(self.elapsed());
        self.started_at.set(None);
    }

    /// Whether the stopwatch is running.
    pub fn is_started(&self) -> bool {
        self.started_at.get().is_some()
    }

    /// Time since `start`, or the stored time when stopped.
    pub fn elapsed(&self) -> Duration {
        match self.started_at.get() {
            Some(start) => start.elapsed(),
            None => self.stored.get(),
        }
    }

    /// Consult the policy with the current elapsed time.
    pub fn check(&self) -> Result<(), MeterError> {
        self.policy.on_check(self.is_started(), self.elapsed())
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("started", &self.is_started())
            .field("elapsed", &self.elapsed())
            .finish()
    }
}
