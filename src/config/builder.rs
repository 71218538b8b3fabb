//! Default config file creation.
//!
//! The file is assembled with [`ConfigBuilder`] so every setting's trailing comment
//! lines up in one column.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::DateFormat;
use crate::common::constants::*;
use crate::common::utils::private_path;

/// Write the default configuration to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));
    Ok(())
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    let mut content = ConfigBuilder::new()
        .add_section("Transition")
        .add_setting(
            "animation_duration_ms",
            &DEFAULT_ANIMATION_DURATION_MS.to_string(),
            &format!(
                "Length of the lock/unlock animation ({MINIMUM_ANIMATION_DURATION_MS}-{MAXIMUM_ANIMATION_DURATION_MS})ms"
            ),
        )
        .add_section("Idle")
        .add_setting(
            "idle_threshold_ms",
            &DEFAULT_IDLE_THRESHOLD_MS.to_string(),
            &format!(
                "Inactivity before the unlocked view relocks ({MINIMUM_IDLE_THRESHOLD_MS}-{MAXIMUM_IDLE_THRESHOLD_MS})ms"
            ),
        )
        .add_section("Timing")
        .add_setting(
            "timer_period_ms",
            &DEFAULT_TIMER_PERIOD_MS.to_string(),
            &format!(
                "Clock and idle check period ({MINIMUM_TIMER_PERIOD_MS}-{MAXIMUM_TIMER_PERIOD_MS})ms"
            ),
        )
        .add_setting(
            "frame_interval_ms",
            &DEFAULT_FRAME_INTERVAL_MS.to_string(),
            &format!(
                "Delay between animation frames ({MINIMUM_FRAME_INTERVAL_MS}-{MAXIMUM_FRAME_INTERVAL_MS})ms"
            ),
        )
        .add_section("Clock")
        .add_setting(
            "date_format",
            &format!("\"{}\"", DateFormat::default().as_str()),
            "Clock style: \"military\" (24-hour) or \"standard\" (12-hour)",
        )
        .add_setting(
            "show_seconds",
            &DEFAULT_SHOW_SECONDS.to_string(),
            "Show seconds on the locked clock",
        )
        .build();
    content.push('\n');
    content
}

/// Builds TOML text with aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<Entry>,
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let column = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Setting { line, .. } => Some(line.len()),
                Entry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Section(title) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                Entry::Setting { line, comment } => {
                    lines.push(format!("{line:<column$}{comment}"));
                }
            }
        }
        lines.join("\n")
    }
}
