//! Bounded exponential backoff for run polling.
//!
//! Tight fixed-interval polling trips the remote API's rate limits, and an
//! unbounded wait lets a hung run pin the calling request. The schedule
//! here doubles from a short initial delay up to a ceiling, and the relay
//! enforces both an attempt count and a wall-clock budget on top of it.

use std::time::Duration;

/// Polling schedule for waiting on a remote run.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first status check.
    pub initial_interval: Duration,
    /// Ceiling the doubling delay saturates at.
    pub max_interval: Duration,
    /// Maximum number of status checks.
    pub max_attempts: u32,
    /// Hard wall-clock budget across the whole wait.
    pub max_total: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(200),
            max_interval: Duration::from_secs(3),
            max_attempts: 25,
            max_total: Duration::from_secs(30),
        }
    }
}

/// Delay sequence: doubling from the initial interval, saturating at the
/// cap. Endless; the caller owns the stopping condition.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    cap: Duration,
}

impl Backoff {
    /// Creates a backoff sequence from a polling schedule.
    #[must_use]
    pub fn new(config: &PollConfig) -> Self {
        Self {
            next: config.initial_interval,
            cap: config.max_interval,
        }
    }

    /// Returns the next delay and advances the sequence.
    pub fn delay(&mut self) -> Duration {
        let current = self.next;
        self.next = (self.next * 2).min(self.cap);
        current
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.delay())
    }
}
