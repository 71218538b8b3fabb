//! Time source abstraction for real and simulated time.
//!
//! The transition engine and idle tracker only ever see [`Timestamp`] values handed to
//! them, so they never call into this module. The hosts and the logger read time from
//! the global source instead, which lets the simulate command run the full lock screen
//! on a fast-forward clock without touching the core.

use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::Timestamp;

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Wall-clock time, used for the clock and date on the locked view.
    fn now(&self) -> DateTime<Local>;

    /// Monotonic reading used for animation progress and idle detection.
    fn monotonic(&self) -> Timestamp;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: Duration);

    fn is_simulated(&self) -> bool;
}

/// Real-time implementation backed by the system clocks.
pub struct RealTimeSource {
    origin: Instant,
}

impl RealTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for RealTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn monotonic(&self) -> Timestamp {
        Timestamp::from_millis(self.origin.elapsed().as_millis() as u64)
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Fast-forward clock: sleeping advances simulated time instantly.
///
/// Both readings derive from one elapsed-milliseconds counter, so the wall clock shown
/// on the locked view and the monotonic timestamps fed to the engine never drift apart.
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    elapsed_ms: AtomicU64,
}

impl SimulatedTimeSource {
    pub fn new(start_time: DateTime<Local>) -> Self {
        Self {
            start_time,
            elapsed_ms: AtomicU64::new(0),
        }
    }

    /// Move the clock forward to `target`. Earlier targets are ignored.
    pub fn advance_to(&self, target: Timestamp) {
        self.elapsed_ms
            .fetch_max(target.as_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, duration: Duration) {
        self.elapsed_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        let elapsed = self.elapsed_ms.load(Ordering::SeqCst);
        self.start_time + ChronoDuration::milliseconds(elapsed as i64)
    }

    fn monotonic(&self) -> Timestamp {
        Timestamp::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn global() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource::new()))
}

/// Get the current wall-clock time from the global time source
pub fn now() -> DateTime<Local> {
    global().now()
}

/// Get the current monotonic timestamp from the global time source
pub fn monotonic() -> Timestamp {
    global().monotonic()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: Duration) {
    global().sleep(duration)
}

/// Check if we're running on simulated time
pub fn is_simulated() -> bool {
    global().is_simulated()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS"
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    use chrono::NaiveDateTime;

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))
        .and_then(|naive| {
            Local
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(|| "Ambiguous or invalid local time".to_string())
        })
}
