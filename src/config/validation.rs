//! Configuration validation.
//!
//! Every field has an inclusive range; the only cross-field rule is that animation
//! frames must come at least as often as the clock timer.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;

pub fn validate_config(config: &Config) -> Result<()> {
    check_range(
        "animation_duration_ms",
        config.animation_duration_ms,
        MINIMUM_ANIMATION_DURATION_MS,
        MAXIMUM_ANIMATION_DURATION_MS,
    )?;
    check_range(
        "idle_threshold_ms",
        config.idle_threshold_ms,
        MINIMUM_IDLE_THRESHOLD_MS,
        MAXIMUM_IDLE_THRESHOLD_MS,
    )?;
    check_range(
        "timer_period_ms",
        config.timer_period_ms,
        MINIMUM_TIMER_PERIOD_MS,
        MAXIMUM_TIMER_PERIOD_MS,
    )?;
    check_range(
        "frame_interval_ms",
        config.frame_interval_ms,
        MINIMUM_FRAME_INTERVAL_MS,
        MAXIMUM_FRAME_INTERVAL_MS,
    )?;

    let frame = config.frame_interval_ms();
    let period = config.timer_period_ms();
    if frame > period {
        anyhow::bail!(
            "frame_interval_ms ({frame} ms) must not exceed timer_period_ms ({period} ms)"
        );
    }

    Ok(())
}

fn check_range(field: &str, value: Option<u64>, min: u64, max: u64) -> Result<()> {
    if let Some(value) = value
        && !(min..=max).contains(&value)
    {
        anyhow::bail!("{field} ({value} ms) must be between {min} and {max} milliseconds");
    }
    Ok(())
}
