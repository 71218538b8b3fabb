//! Host-agnostic tick scheduling.
//!
//! Replaces the window timer of a desktop host: a periodic clock tick drives idle checks
//! and the live clock, and while a redraw is pending the host is woken at the frame
//! interval so animations advance smoothly.

use std::time::Duration;

use crate::time::Timestamp;

#[derive(Debug, Clone)]
pub struct Scheduler {
    period_ms: u64,
    frame_interval_ms: u64,
    next_timer: Timestamp,
}

impl Scheduler {
    /// First timer tick fires one period after `now`.
    pub fn new(period_ms: u64, frame_interval_ms: u64, now: Timestamp) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            frame_interval_ms: frame_interval_ms.max(1),
            next_timer: now.saturating_add_millis(period_ms),
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn next_timer(&self) -> Timestamp {
        self.next_timer
    }

    /// Consume the timer tick if it is due.
    ///
    /// Missed periods collapse into a single tick and the schedule stays aligned to the
    /// original phase.
    pub fn timer_due(&mut self, now: Timestamp) -> bool {
        if now < self.next_timer {
            return false;
        }
        let behind = now.saturating_since(self.next_timer);
        let skipped = behind / self.period_ms + 1;
        self.next_timer = self
            .next_timer
            .saturating_add_millis(skipped * self.period_ms);
        true
    }

    /// Next moment the host has work to do.
    pub fn next_deadline(&self, now: Timestamp, redraw_pending: bool) -> Timestamp {
        if redraw_pending {
            let frame = now.saturating_add_millis(self.frame_interval_ms);
            frame.min(self.next_timer)
        } else {
            self.next_timer
        }
    }

    /// How long the host may block waiting for input.
    pub fn next_wakeup(&self, now: Timestamp, redraw_pending: bool) -> Duration {
        now.until(self.next_deadline(now, redraw_pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_timer_fires_once_per_period() {
        let mut scheduler = Scheduler::new(1_000, 16, at(0));
        assert!(!scheduler.timer_due(at(999)));
        assert!(scheduler.timer_due(at(1_000)));
        assert!(!scheduler.timer_due(at(1_500)));
        assert!(scheduler.timer_due(at(2_001)));
        assert_eq!(scheduler.next_timer(), at(3_000));
    }

    #[test]
    fn test_missed_periods_coalesce() {
        let mut scheduler = Scheduler::new(1_000, 16, at(0));
        assert!(scheduler.timer_due(at(5_250)));
        assert_eq!(scheduler.next_timer(), at(6_000));
        assert!(!scheduler.timer_due(at(5_999)));
    }

    #[test]
    fn test_wakeup_prefers_frames_while_redrawing() {
        let scheduler = Scheduler::new(1_000, 16, at(0));
        assert_eq!(scheduler.next_wakeup(at(100), true), Duration::from_millis(16));
        assert_eq!(scheduler.next_wakeup(at(100), false), Duration::from_millis(900));
        assert_eq!(scheduler.next_wakeup(at(990), true), Duration::from_millis(10));
    }

    #[test]
    fn test_wakeup_when_overdue_is_zero() {
        let scheduler = Scheduler::new(1_000, 16, at(0));
        assert_eq!(scheduler.next_wakeup(at(1_200), false), Duration::ZERO);
    }
}
