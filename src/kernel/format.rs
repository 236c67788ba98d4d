//! Idle-triggered auto format.
//!
//! `Idle -> Pending(deadline) -> Idle`. Every edit re-arms the deadline
//! (debounce, not throttle); the host polls it from its tick.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FormatScheduler {
    idle: Duration,
    deadline: Option<Instant>,
}

impl FormatScheduler {
    pub fn new(idle: Duration) -> Self {
        Self {
            idle,
            deadline: None,
        }
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Starts or restarts the quiet period from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.idle);
    }

    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true exactly once per armed period, when `now` has reached the
    /// deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 50 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "format debounce overshoot"
            );
        }
        self.deadline = None;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/format.rs"]
mod tests;
