//! Time primitives: monotonic timestamps and the process-wide time source.

pub mod source;

use std::fmt;
use std::time::Duration;

/// Monotonic clock reading in whole milliseconds.
///
/// Timestamps only make sense relative to each other within one process; the origin is
/// whatever the active [`source::TimeSource`] chose when it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, or zero if `earlier` is in the future.
    pub fn saturating_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn saturating_add_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Wait until `later`, zero when it has already passed.
    pub fn until(self, later: Timestamp) -> Duration {
        Duration::from_millis(later.saturating_since(self))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
