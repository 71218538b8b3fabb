//! Application coordinator that manages the complete lifecycle of the lock screen.
//!
//! This module handles resource acquisition, initialization, and orchestration of the
//! terminal host. It manages:
//! - Optional file logging
//! - Configuration loading
//! - Lock file management for single-instance enforcement
//! - Signal handler setup
//! - Session detection (username and password marker)
//!
//! The `Vivace` struct uses a builder pattern:
//! - Normal startup: `Vivace::new(debug_enabled).run()`
//! - Custom marker location: `Vivace::new(false).with_data_dir(dir).run()`

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{
    common::{logger::Log, utils::private_path},
    config::Config,
    core::{Core, CoreParams, Scheduler},
    io::{
        lock::{acquire_lock, default_lock_path},
        session::Session,
        signals::setup_signal_handler,
    },
    render::SceneRenderer,
    terminal,
    time::source,
};

/// Builder for configuring and running the interactive lock screen.
///
/// # Examples
///
/// ```no_run
/// use vivace::Vivace;
///
/// # fn main() -> anyhow::Result<()> {
/// Vivace::new(false)
///     .with_log_file(Some("/tmp/vivace.log".to_string()))
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct Vivace {
    debug_enabled: bool,
    data_dir: Option<PathBuf>,
    log_file: Option<String>,
}

impl Vivace {
    /// Create a new runner with defaults matching a normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            data_dir: None,
            log_file: None,
        }
    }

    /// Keep the password marker under `dir` instead of the user data directory
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.data_dir = dir;
        self
    }

    /// Keep logging to `path` while the lock screen owns the terminal
    pub fn with_log_file(mut self, path: Option<String>) -> Self {
        self.log_file = path;
        self
    }

    /// Execute the application with the configured settings.
    ///
    /// Logging to stdout would tear through the alternate screen, so without a log
    /// file it is paused between taking over the terminal and restoring it.
    pub fn run(self) -> Result<()> {
        let _log_guard = match &self.log_file {
            Some(path) => Some(
                Log::start_file_logging(path.clone())
                    .with_context(|| format!("Failed to start logging to {path}"))?,
            ),
            None => None,
        };

        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - showing detailed state changes");
        }

        let config = Config::load()?;
        config.log_config();

        let lock = acquire_lock(&default_lock_path())?;
        log_block_start!("Lock acquired at {}", private_path(lock.path()));

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        let session = Session::detect(self.data_dir.as_deref());

        let now = source::monotonic();
        let core = Core::new(
            CoreParams {
                renderer: Box::new(
                    SceneRenderer::new(config.idle_threshold_ms())
                        .with_clock(config.date_format(), config.show_seconds()),
                ),
                username: session.username.clone(),
                animation_duration_ms: config.animation_duration_ms(),
                idle_threshold_ms: config.idle_threshold_ms(),
                debug_enabled: self.debug_enabled,
            },
            now,
        );
        let scheduler = Scheduler::new(config.timer_period_ms(), config.frame_interval_ms(), now);

        log_block_start!("Showing the lock screen for {}", session.username);
        if self.log_file.is_none() {
            log_indented!("Output resumes when the lock screen closes (use --log to follow it)");
            Log::set_enabled(false);
        }

        let result = terminal::run(core, scheduler, &signal_state, self.debug_enabled);
        Log::set_enabled(true);

        if let Err(e) = lock.release() {
            log_warning!("Failed to release the lock file: {e}");
        }

        result?;

        log_block_start!("Lock screen closed");
        log_end!();
        Ok(())
    }
}
