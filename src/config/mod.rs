//! Configuration for vivace: optional timing overrides read from TOML.
//!
//! The file lives at `<config_dir>/vivace/vivace.toml`, or in the directory given with
//! `--config`. Every field is optional and falls back to the built-in default:
//!
//! ```toml
//! #[Transition]
//! animation_duration_ms = 500  # Length of the lock/unlock animation (50-10000)ms
//!
//! #[Idle]
//! idle_threshold_ms = 300000   # Inactivity before the unlocked view relocks (1000-86400000)ms
//!
//! #[Timing]
//! timer_period_ms = 1000       # Clock and idle check period (100-60000)ms
//! frame_interval_ms = 16       # Delay between animation frames (1-1000)ms
//!
//! #[Clock]
//! date_format = "military"     # Clock style: "military" (24-hour) or "standard" (12-hour)
//! show_seconds = true          # Show seconds on the locked clock
//! ```
//!
//! A missing file is created from this template on first run. Values are validated on
//! load; an out-of-range value is an error that names the field and its bounds.

pub mod builder;
pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::constants::*;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Clock style of the locked view.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// 24-hour clock, `14:05`.
    #[default]
    Military,
    /// 12-hour clock with AM/PM, `02:05 PM`.
    Standard,
}

impl DateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::Military => "military",
            DateFormat::Standard => "standard",
        }
    }
}

/// Parsed configuration file. `None` means "use the default".
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Duration of the locked/unlocked transition animation in milliseconds.
    pub animation_duration_ms: Option<u64>,

    /// Inactivity in milliseconds after which the unlocked view relocks.
    pub idle_threshold_ms: Option<u64>,

    /// Period of the clock/idle timer in milliseconds.
    pub timer_period_ms: Option<u64>,

    /// Delay between animation frames in milliseconds.
    pub frame_interval_ms: Option<u64>,

    /// 24-hour or 12-hour clock on the locked view.
    pub date_format: Option<DateFormat>,

    /// Whether the locked clock shows seconds.
    pub show_seconds: Option<bool>,
}

impl Config {
    pub fn animation_duration_ms(&self) -> u64 {
        self.animation_duration_ms
            .unwrap_or(DEFAULT_ANIMATION_DURATION_MS)
    }

    pub fn idle_threshold_ms(&self) -> u64 {
        self.idle_threshold_ms.unwrap_or(DEFAULT_IDLE_THRESHOLD_MS)
    }

    pub fn timer_period_ms(&self) -> u64 {
        self.timer_period_ms.unwrap_or(DEFAULT_TIMER_PERIOD_MS)
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms.unwrap_or(DEFAULT_FRAME_INTERVAL_MS)
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format.unwrap_or_default()
    }

    pub fn show_seconds(&self) -> bool {
        self.show_seconds.unwrap_or(DEFAULT_SHOW_SECONDS)
    }

    /// Load configuration using the module's load function
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Animation: {}ms", self.animation_duration_ms());
        log_indented!("Idle lock after: {}", format_duration_ms(self.idle_threshold_ms()));
        log_indented!("Timer period: {}ms", self.timer_period_ms());
        log_indented!("Frame interval: {}ms", self.frame_interval_ms());
        log_indented!(
            "Clock: {}{}",
            self.date_format().as_str(),
            if self.show_seconds() { " with seconds" } else { "" }
        );
    }
}

/// `300000` → `5m`, `90000` → `1m 30s`, `1500` → `1.5s`.
fn format_duration_ms(ms: u64) -> String {
    let secs = ms / 1000;
    let millis = ms % 1000;
    if secs < 60 {
        return if millis == 0 {
            format!("{secs}s")
        } else {
            format!("{}s", ms as f64 / 1000.0)
        };
    }
    let (minutes, seconds) = (secs / 60, secs % 60);
    if seconds == 0 {
        format!("{minutes}m")
    } else {
        format!("{minutes}m {seconds}s")
    }
}
