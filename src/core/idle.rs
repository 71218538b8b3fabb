//! Idle detection against a fixed inactivity threshold.

use crate::common::constants::DEFAULT_IDLE_THRESHOLD_MS;
use crate::time::Timestamp;

/// Tracks the most recent user input.
#[derive(Debug, Clone)]
pub struct IdleTracker {
    last_input: Timestamp,
    threshold_ms: u64,
}

impl IdleTracker {
    /// Start tracking with `now` counted as the latest input.
    pub fn new(threshold_ms: u64, now: Timestamp) -> Self {
        Self {
            last_input: now,
            threshold_ms,
        }
    }

    pub fn with_default_threshold(now: Timestamp) -> Self {
        Self::new(DEFAULT_IDLE_THRESHOLD_MS, now)
    }

    pub fn record_input(&mut self, now: Timestamp) {
        self.last_input = now;
    }

    pub fn last_input(&self) -> Timestamp {
        self.last_input
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    pub fn idle_for(&self, now: Timestamp) -> u64 {
        now.saturating_since(self.last_input)
    }

    /// True once at least `threshold_ms` has passed without input.
    pub fn is_idle(&self, now: Timestamp) -> bool {
        self.idle_for(now) >= self.threshold_ms
    }
}
