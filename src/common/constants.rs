//! Application-wide defaults, limits, and palette.

use crate::render::Rgb;

// # Timing defaults

/// Length of the locked/unlocked transition animation.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 500;

/// Inactivity after which the unlocked view relocks (5 minutes).
pub const DEFAULT_IDLE_THRESHOLD_MS: u64 = 5 * 60 * 1000;

/// Period of the clock/idle timer.
pub const DEFAULT_TIMER_PERIOD_MS: u64 = 1000;

/// Delay between animation frames while a redraw is pending.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

// # Clock defaults

pub const DEFAULT_SHOW_SECONDS: bool = true;

// # Validation limits

pub const MINIMUM_ANIMATION_DURATION_MS: u64 = 50;
pub const MAXIMUM_ANIMATION_DURATION_MS: u64 = 10_000;
pub const MINIMUM_IDLE_THRESHOLD_MS: u64 = 1_000;
pub const MAXIMUM_IDLE_THRESHOLD_MS: u64 = 24 * 60 * 60 * 1000;
pub const MINIMUM_TIMER_PERIOD_MS: u64 = 100;
pub const MAXIMUM_TIMER_PERIOD_MS: u64 = 60_000;
pub const MINIMUM_FRAME_INTERVAL_MS: u64 = 1;
pub const MAXIMUM_FRAME_INTERVAL_MS: u64 = 1_000;

// # Files and locations

pub const CONFIG_DIR_NAME: &str = "vivace";
pub const CONFIG_FILE_NAME: &str = "vivace.toml";

/// Per-user directory holding the password marker.
pub const DATA_DIR_NAME: &str = "VivaceLockScreen";
pub const MARKER_FILE_NAME: &str = "password.txt";

/// Opaque placeholder written into a freshly created marker file.
pub const MARKER_PLACEHOLDER: &str = "dummy_hashed_password";

pub const LOCK_FILE_NAME: &str = "vivace.lock";

/// Identity shown when the username cannot be determined.
pub const FALLBACK_USERNAME: &str = "Guest";

// # Palette

/// Base color behind blended transition frames.
pub const BASE_BACKGROUND: Rgb = Rgb::new(20, 20, 20);
pub const LOCKED_BACKGROUND: Rgb = Rgb::new(20, 20, 20);
pub const UNLOCKED_BACKGROUND: Rgb = Rgb::new(40, 40, 40);
pub const TEXT_WHITE: Rgb = Rgb::new(255, 255, 255);
pub const TEXT_GRAY: Rgb = Rgb::new(180, 180, 180);
pub const TEXT_DARK_GRAY: Rgb = Rgb::new(50, 50, 50);
pub const ACCENT_BLUE: Rgb = Rgb::new(0, 120, 215);

// # View text

pub const LOCKED_HINT: &str = "Click anywhere or press a key to unlock";
pub const SECRET_MASKED: &str = "********";
pub const SECRET_REVEALED: &str = "Password";

// # Simulation defaults

pub const DEFAULT_SIMULATION_WIDTH: u32 = 160;
pub const DEFAULT_SIMULATION_HEIGHT: u32 = 90;

/// Built-in simulate script: unlock, toggle the secret, relock, unlock and go idle.
pub const DEFAULT_SIMULATION_SCRIPT: &str =
    "1000:click, 2500:toggle, 4000:esc, 6000:key, 7000:move";

// # Exit codes

pub const EXIT_FAILURE: i32 = 1;
