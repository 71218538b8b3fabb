//! End-to-end runs of the headless host against configuration files on disk.

use std::fs;
use tempfile::tempdir;
use vivace::args::{CliAction, ParsedArgs};
use vivace::commands::simulate::{SimulationOptions, run_simulation};
use vivace::config::Config;
use vivace::core::AppState;
use vivace::io::session::Session;
use vivace::time::source::{SimulatedTimeSource, parse_datetime};

fn clock() -> SimulatedTimeSource {
    SimulatedTimeSource::new(parse_datetime("2025-06-01 23:59:58").unwrap())
}

fn simulate_options(args: &[&str]) -> SimulationOptions {
    let argv = std::iter::once("vivace").chain(std::iter::once("simulate")).chain(args.iter().copied());
    match ParsedArgs::parse(argv).action {
        CliAction::Simulate { options, .. } => SimulationOptions::from_args(&options).unwrap(),
        other => panic!("expected a simulate action, got {other:?}"),
    }
}

#[test]
fn test_configured_short_idle_relocks() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("vivace.toml");
    fs::write(
        &config_path,
        "animation_duration_ms = 200\nidle_threshold_ms = 1500\ntimer_period_ms = 250\n",
    )
    .unwrap();
    let config = Config::load_from_path(&config_path).unwrap();

    let options = simulate_options(&["--script", "100:key", "--until", "4000", "--size", "48x28"]);
    let report = run_simulation(&options, &config, "tester", &clock(), false).unwrap();

    let states: Vec<_> = report.state_changes.iter().map(|c| c.state).collect();
    assert_eq!(states, vec![AppState::Unlocked, AppState::Locked]);
    assert_eq!(report.auto_locks, 1);
    assert_eq!(report.final_state, AppState::Locked);

    // Idle since 100ms with a 1500ms threshold: the 1750ms tick relocks.
    let relock = report.state_changes[1];
    assert!(relock.at_ms >= 1_950 && relock.at_ms < 2_000, "{}", relock.at_ms);
}

#[test]
fn test_escape_mid_unlock_is_ignored_but_relock_restarts() {
    let options = simulate_options(&[
        "--script",
        "0:click, 100:esc, 1000:esc, 1200:esc",
        "--until",
        "3000",
        "--size",
        "32x18",
    ]);
    let report = run_simulation(&options, &Config::default(), "tester", &clock(), false).unwrap();

    let states: Vec<_> = report.state_changes.iter().map(|c| c.state).collect();
    assert_eq!(states, vec![AppState::Unlocked, AppState::Locked]);

    // The second Escape restarted the relock, so it lands 500ms after 1200ms.
    let relock = report.state_changes[1];
    assert!(relock.at_ms >= 1_700 && relock.at_ms < 1_720, "{}", relock.at_ms);
}

#[test]
fn test_session_marker_in_custom_data_dir() {
    let dir = tempdir().unwrap();
    let session = Session::detect(Some(dir.path()));

    assert!(!session.username.is_empty());
    assert!(session.marker.exists);
    let marker = session.marker.path.unwrap();
    assert!(marker.starts_with(dir.path()));
    assert!(marker.is_file());
}
