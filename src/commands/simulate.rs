//! Implementation of the `simulate` command: the lock screen on a fast-forward clock.
//!
//! A scripted sequence of input events is fed into the same [`Core`] the terminal host
//! uses, while a [`SimulatedTimeSource`] jumps straight to each next deadline (input,
//! timer tick, or animation frame). Rendered frames can be written out as PNG files.
//!
//! Script format: comma-separated `<ms>:<event>` entries, where `<event>` is one of
//! `click` (center of the screen), `toggle` (the reveal toggle), `esc`, `key`, or
//! `move`. Entries may be given in any order; they are delivered by time.

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::args::SimulateArgs;
use crate::common::constants::{
    DEFAULT_SIMULATION_HEIGHT, DEFAULT_SIMULATION_SCRIPT, DEFAULT_SIMULATION_WIDTH,
};
use crate::common::utils::private_path;
use crate::config::Config;
use crate::core::{AppState, Core, CoreParams, InputEvent, Key, RenderOutcome, Scheduler};
use crate::io::session::Session;
use crate::render::{SceneRenderer, Surface, UnlockedLayout};
use crate::time::source::{self, SimulatedTimeSource, TimeSource};

/// Simulated time added after the last scripted event when `--until` is not given.
const DEFAULT_TAIL_MS: u64 = 3_000;

/// What a script entry does once its time comes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    Click,
    Toggle,
    Escape,
    Key,
    Move,
}

impl ScriptAction {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "click" => Some(Self::Click),
            "toggle" | "reveal" => Some(Self::Toggle),
            "esc" | "escape" => Some(Self::Escape),
            "key" => Some(Self::Key),
            "move" => Some(Self::Move),
            _ => None,
        }
    }

    /// Concrete input event for a viewport of `width × height` pixels.
    fn to_event(self, width: u32, height: u32) -> InputEvent {
        let (cx, cy) = (width as i32 / 2, height as i32 / 2);
        match self {
            Self::Click => InputEvent::Click { x: cx, y: cy },
            Self::Toggle => {
                let (x, y) = UnlockedLayout::new(width, height).reveal_toggle.center();
                InputEvent::Click { x, y }
            }
            Self::Escape => InputEvent::Key(Key::Escape),
            Self::Key => InputEvent::Key(Key::Other),
            Self::Move => InputEvent::PointerMove { x: cx + 1, y: cy + 1 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEntry {
    pub at_ms: u64,
    pub action: ScriptAction,
}

/// Parse an event script. The result is sorted by time; ties keep script order.
pub fn parse_script(script: &str) -> Result<Vec<ScriptEntry>> {
    let mut entries = Vec::new();

    for raw in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((at, name)) = raw.split_once(':') else {
            bail!("Invalid script entry '{raw}': expected <ms>:<event>");
        };
        let at_ms: u64 = at
            .trim()
            .parse()
            .with_context(|| format!("Invalid time in script entry '{raw}'"))?;
        let Some(action) = ScriptAction::parse(name) else {
            bail!(
                "Unknown event '{}' in script entry '{raw}' (expected click, toggle, esc, key, or move)",
                name.trim()
            );
        };
        entries.push(ScriptEntry { at_ms, action });
    }

    entries.sort_by_key(|entry| entry.at_ms);
    Ok(entries)
}

/// Fully resolved settings for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub script: Vec<ScriptEntry>,
    pub until_ms: u64,
    pub width: u32,
    pub height: u32,
    pub frames_dir: Option<PathBuf>,
}

impl SimulationOptions {
    /// Fill in defaults for everything the command line left out.
    pub fn from_args(args: &SimulateArgs) -> Result<Self> {
        let script = parse_script(args.script.as_deref().unwrap_or(DEFAULT_SIMULATION_SCRIPT))?;
        let last_event = script.last().map_or(0, |entry| entry.at_ms);
        let (width, height) = args
            .size
            .unwrap_or((DEFAULT_SIMULATION_WIDTH, DEFAULT_SIMULATION_HEIGHT));

        Ok(Self {
            script,
            until_ms: args
                .until_ms
                .unwrap_or(last_event.saturating_add(DEFAULT_TAIL_MS)),
            width,
            height,
            frames_dir: args.frames_dir.as_ref().map(PathBuf::from),
        })
    }
}

/// A completed transition, stamped with the simulated time of its final frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub at_ms: u64,
    pub state: AppState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub frames_rendered: u64,
    pub frames_written: u64,
    pub timer_ticks: u64,
    pub auto_locks: u64,
    pub state_changes: Vec<StateChange>,
    pub final_state: AppState,
    pub reveal_secret: bool,
}

/// Run the simulation loop to completion on `clock`.
///
/// The clock only ever moves forward to the next deadline, so the run takes as long
/// as the rendering does, not as long as the simulated span.
pub fn run_simulation(
    options: &SimulationOptions,
    config: &Config,
    username: &str,
    clock: &SimulatedTimeSource,
    debug_enabled: bool,
) -> Result<SimulationReport> {
    if let Some(dir) = &options.frames_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create frames directory {}", dir.display()))?;
    }

    let start = clock.monotonic();
    let until = start.saturating_add_millis(options.until_ms);
    let viewport = (options.width, options.height);

    let mut core = Core::new(
        CoreParams {
            renderer: Box::new(
                SceneRenderer::new(config.idle_threshold_ms())
                    .with_clock(config.date_format(), config.show_seconds()),
            ),
            username: username.to_string(),
            animation_duration_ms: config.animation_duration_ms(),
            idle_threshold_ms: config.idle_threshold_ms(),
            debug_enabled,
        },
        start,
    );
    let mut scheduler = Scheduler::new(config.timer_period_ms(), config.frame_interval_ms(), start);
    let mut surface = Surface::new(options.width, options.height);
    let mut events = options.script.iter().peekable();

    let mut report = SimulationReport {
        frames_rendered: 0,
        frames_written: 0,
        timer_ticks: 0,
        auto_locks: 0,
        state_changes: Vec::new(),
        final_state: core.state(),
        reveal_secret: false,
    };

    loop {
        let now = clock.monotonic();

        while let Some(entry) = events.next_if(|entry| start.saturating_add_millis(entry.at_ms) <= now) {
            let event = entry.action.to_event(options.width, options.height);
            if debug_enabled {
                log_debug!("Script: {:?} at {}ms", entry.action, entry.at_ms);
            }
            core.handle_input(event, now, viewport);
        }

        if scheduler.timer_due(now) {
            report.timer_ticks += 1;
            if core.on_timer(now) {
                report.auto_locks += 1;
            }
        }

        if core.redraw_requested() {
            let outcome = core.render(now, clock.now(), &mut surface);
            report.frames_rendered += 1;

            if let RenderOutcome::Completed(state) = outcome {
                report.state_changes.push(StateChange {
                    at_ms: now.saturating_since(start),
                    state,
                });
            }

            if let Some(dir) = &options.frames_dir {
                let path = dir.join(format!(
                    "frame_{:05}_{:06}ms.png",
                    report.frames_written,
                    now.saturating_since(start)
                ));
                write_frame(&surface, &path)?;
                report.frames_written += 1;
            }
        }

        if now >= until {
            break;
        }

        let mut next = scheduler.next_deadline(now, core.redraw_requested());
        if let Some(entry) = events.peek() {
            next = next.min(start.saturating_add_millis(entry.at_ms));
        }
        let next = next.min(until).max(now.saturating_add_millis(1));
        clock.advance_to(next);
    }

    report.final_state = core.state();
    report.reveal_secret = core.reveal_secret();
    Ok(report)
}

/// Save `surface` as an RGB PNG.
pub fn write_frame(surface: &Surface, path: &Path) -> Result<()> {
    let image = image::RgbImage::from_fn(surface.width(), surface.height(), |x, y| {
        let pixel = surface.get(x, y).unwrap_or_default();
        image::Rgb([pixel.r, pixel.g, pixel.b])
    });
    image
        .save(path)
        .with_context(|| format!("Failed to write frame {}", path.display()))
}

/// Handle the `simulate` command.
///
/// Installs the simulated clock as the global time source before anything is logged,
/// so every log line carries the simulated timestamp.
pub fn handle_simulate_command(
    args: &SimulateArgs,
    data_dir: Option<&Path>,
    debug_enabled: bool,
) -> Result<()> {
    let options = SimulationOptions::from_args(args)?;

    let clock = Arc::new(SimulatedTimeSource::new(Local::now()));
    source::init_time_source(clock.clone());

    log_version!();
    if debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled");
    }

    let config = Config::load()?;
    config.log_config();

    let session = Session::detect(data_dir);

    log_block_start!(
        "Simulating {}ms at {}x{} with {} scripted events",
        options.until_ms,
        options.width,
        options.height,
        options.script.len()
    );
    if let Some(dir) = &options.frames_dir {
        log_indented!("Writing frames to {}", private_path(dir));
    }

    let report = run_simulation(&options, &config, &session.username, &clock, debug_enabled)?;

    log_block_start!("Simulation complete");
    log_indented!("Frames rendered: {}", report.frames_rendered);
    if options.frames_dir.is_some() {
        log_indented!("Frames written: {}", report.frames_written);
    }
    log_indented!("Timer ticks: {}", report.timer_ticks);
    log_indented!("Idle auto-locks: {}", report.auto_locks);
    for change in &report.state_changes {
        log_indented!("{:>7}ms  {}", change.at_ms, change.state);
    }
    log_indented!("Final state: {}", report.final_state);
    log_end!();

    Ok(())
}

/// Display help for the simulate command.
pub fn display_help() {
    log_version!();
    log_block_start!("simulate - Run the lock screen headlessly on a simulated clock");
    log_block_start!("Usage: vivace simulate [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-s, --script <events>  Comma-separated <ms>:<event> entries");
    log_indented!("                       Events: click, toggle, esc, key, move");
    log_indented!("-u, --until <ms>       Simulated milliseconds to run for");
    log_indented!("                       Default: last event + 3000");
    log_indented!("    --size <W>x<H>     Surface size in pixels (default: 160x90)");
    log_indented!("-f, --frames <dir>     Write every rendered frame as a PNG");
    log_block_start!("Examples:");
    log_indented!("# Unlock, reveal, relock");
    log_indented!("vivace simulate --script \"500:click, 1500:toggle, 2500:esc\"");
    log_pipe!();
    log_indented!("# Export frames of the default script");
    log_indented!("vivace simulate --frames /tmp/vivace-frames");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;
    use crate::time::source::parse_datetime;

    fn clock() -> SimulatedTimeSource {
        SimulatedTimeSource::new(parse_datetime("2025-03-14 09:30:00").unwrap())
    }

    fn options(script: &str, until_ms: u64) -> SimulationOptions {
        SimulationOptions {
            script: parse_script(script).unwrap(),
            until_ms,
            width: 64,
            height: 36,
            frames_dir: None,
        }
    }

    fn states(report: &SimulationReport) -> Vec<AppState> {
        report.state_changes.iter().map(|change| change.state).collect()
    }

    #[test]
    fn test_parse_script_sorts_by_time() {
        let entries = parse_script("4000:esc, 1000:click,2500 : toggle, 6000:KEY, 7000:move").unwrap();
        let actions: Vec<_> = entries.iter().map(|entry| entry.action).collect();
        assert_eq!(
            actions,
            vec![
                ScriptAction::Click,
                ScriptAction::Toggle,
                ScriptAction::Escape,
                ScriptAction::Key,
                ScriptAction::Move,
            ]
        );
        assert_eq!(entries[0].at_ms, 1000);
    }

    #[test]
    fn test_parse_script_accepts_empty() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_script_rejects_bad_entries() {
        assert!(parse_script("click").is_err());
        assert!(parse_script("soon:click").is_err());
        assert!(parse_script("100:dance").is_err());
    }

    #[test]
    fn test_options_defaults() {
        let options = SimulationOptions::from_args(&SimulateArgs::default()).unwrap();
        assert_eq!(options.script.len(), 5);
        assert_eq!(options.until_ms, 7000 + DEFAULT_TAIL_MS);
        assert_eq!(
            (options.width, options.height),
            (DEFAULT_SIMULATION_WIDTH, DEFAULT_SIMULATION_HEIGHT)
        );
        assert!(options.frames_dir.is_none());
    }

    #[test]
    fn test_options_default_until_saturates() {
        let args = SimulateArgs {
            script: Some(format!("{}:key", u64::MAX)),
            ..SimulateArgs::default()
        };
        let options = SimulationOptions::from_args(&args).unwrap();
        assert_eq!(options.script[0].at_ms, u64::MAX);
        assert_eq!(options.until_ms, u64::MAX);
    }

    #[test]
    fn test_default_script_walkthrough() {
        let clock = clock();
        let options = SimulationOptions {
            width: 64,
            height: 36,
            ..SimulationOptions::from_args(&SimulateArgs::default()).unwrap()
        };
        let report = run_simulation(&options, &Config::default(), "alice", &clock, false).unwrap();

        assert_eq!(
            states(&report),
            vec![AppState::Unlocked, AppState::Locked, AppState::Unlocked]
        );
        assert_eq!(report.final_state, AppState::Unlocked);
        assert!(report.reveal_secret);
        assert_eq!(report.auto_locks, 0);
        assert_eq!(report.timer_ticks, 10);
        assert_eq!(clock.monotonic(), Timestamp::from_millis(10_000));
    }

    #[test]
    fn test_transitions_take_the_configured_duration() {
        let clock = clock();
        let report = run_simulation(&options("1000:click", 3000), &Config::default(), "alice", &clock, false)
            .unwrap();

        let change = report.state_changes[0];
        assert_eq!(change.state, AppState::Unlocked);
        assert!(change.at_ms >= 1500, "completed too early at {}", change.at_ms);
        assert!(change.at_ms < 1500 + 16, "completed late at {}", change.at_ms);
    }

    #[test]
    fn test_idle_auto_lock() {
        let config = Config {
            idle_threshold_ms: Some(2_000),
            ..Config::default()
        };
        let clock = clock();
        let report =
            run_simulation(&options("500:key, 1200:move", 6_000), &config, "alice", &clock, false).unwrap();

        assert_eq!(report.auto_locks, 1);
        assert_eq!(states(&report), vec![AppState::Unlocked, AppState::Locked]);
        // Last input at 1200ms; the first timer tick at or past 3200ms is 4000ms.
        let relock = report.state_changes[1];
        assert!(relock.at_ms >= 4_500 && relock.at_ms < 4_600, "{}", relock.at_ms);
    }

    #[test]
    fn test_input_while_unlocking_is_ignored() {
        let clock = clock();
        let report = run_simulation(
            &options("1000:click, 1100:key, 1200:esc", 3000),
            &Config::default(),
            "alice",
            &clock,
            false,
        )
        .unwrap();

        assert_eq!(states(&report), vec![AppState::Unlocked]);
    }

    #[test]
    fn test_writes_png_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        let clock = clock();
        let options = SimulationOptions {
            frames_dir: Some(frames.clone()),
            ..options("100:click", 700)
        };

        let report = run_simulation(&options, &Config::default(), "alice", &clock, false).unwrap();

        assert_eq!(report.frames_written, report.frames_rendered);
        let mut written: Vec<_> = std::fs::read_dir(&frames)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        written.sort();
        assert_eq!(written.len() as u64, report.frames_written);

        let first = image::open(&written[0]).unwrap();
        assert_eq!((first.width(), first.height()), (64, 36));
    }
}
