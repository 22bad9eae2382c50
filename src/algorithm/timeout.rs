//! Deadlines consulted at every recursive entry of a search

use std::time::{Duration, Instant};
use thiserror::Error;

/// A start instant paired with an allowed duration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    /// Deadline measured from an explicit start instant
    pub const fn new(started: Instant, limit: Duration) -> Self {
        Self { started, limit }
    }

    /// Deadline measured from now
    pub fn starting_now(limit: Duration) -> Self {
        Self::new(Instant::now(), limit)
    }

    /// Test if more than the allowed duration has passed
    pub fn expired(&self) -> bool {
        self.started.elapsed() > self.limit
    }
}

/// Tri-state answer of a guard check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardStatus {
    /// Neither deadline has passed
    Continue,
    /// The per-test deadline has passed
    SingleTestExceeded,
    /// The batch deadline has passed
    AllTestsExceeded,
}

impl GuardStatus {
    /// Convert into a result the engines can propagate with `?`
    ///
    /// # Errors
    ///
    /// Returns the matching [`Timeout`] when a deadline has passed
    pub const fn into_result(self) -> Result<(), Timeout> {
        match self {
            Self::Continue => Ok(()),
            Self::SingleTestExceeded => Err(Timeout::SingleTest),
            Self::AllTestsExceeded => Err(Timeout::AllTests),
        }
    }
}

/// Reason a search was abandoned before reaching a verdict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Timeout {
    /// The time allowed for one test case ran out
    #[error("single test timeout exceeded")]
    SingleTest,
    /// The time allowed for the whole batch ran out
    #[error("all tests timeout exceeded")]
    AllTests,
}

/// Optional per-test and per-batch deadlines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeoutGuard {
    test: Option<Deadline>,
    batch: Option<Deadline>,
}

impl TimeoutGuard {
    /// Guard that never expires
    pub const fn unbounded() -> Self {
        Self {
            test: None,
            batch: None,
        }
    }

    /// Guard with the given deadlines
    pub const fn new(test: Option<Deadline>, batch: Option<Deadline>) -> Self {
        Self { test, batch }
    }

    /// Check both deadlines, the per-test one first
    pub fn check(&self) -> GuardStatus {
        if self.test.is_some_and(|deadline| deadline.expired()) {
            GuardStatus::SingleTestExceeded
        } else {
            self.check_batch()
        }
    }

    /// Check only the batch deadline
    pub fn check_batch(&self) -> GuardStatus {
        if self.batch.is_some_and(|deadline| deadline.expired()) {
            GuardStatus::AllTestsExceeded
        } else {
            GuardStatus::Continue
        }
    }
}
