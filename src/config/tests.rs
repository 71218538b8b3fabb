use super::builder::default_config_content;
use super::validation::validate_config;
use super::*;
use proptest::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir
        .path()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.animation_duration_ms(), DEFAULT_ANIMATION_DURATION_MS);
    assert_eq!(config.idle_threshold_ms(), DEFAULT_IDLE_THRESHOLD_MS);
}

#[test]
fn test_default_template_parses_to_defaults() {
    let config: Config = toml::from_str(&default_config_content()).unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.animation_duration_ms, Some(DEFAULT_ANIMATION_DURATION_MS));
    assert_eq!(config.idle_threshold_ms, Some(DEFAULT_IDLE_THRESHOLD_MS));
    assert_eq!(config.timer_period_ms, Some(DEFAULT_TIMER_PERIOD_MS));
    assert_eq!(config.frame_interval_ms, Some(DEFAULT_FRAME_INTERVAL_MS));
    assert_eq!(config.date_format, Some(DateFormat::Military));
    assert_eq!(config.show_seconds, Some(DEFAULT_SHOW_SECONDS));
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "");

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.animation_duration_ms(), 500);
    assert_eq!(config.idle_threshold_ms(), 300_000);
    assert_eq!(config.timer_period_ms(), 1_000);
    assert_eq!(config.frame_interval_ms(), 16);
    assert_eq!(config.date_format(), DateFormat::Military);
    assert!(config.show_seconds());
}

#[test]
fn test_clock_options() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        "date_format = \"standard\"\nshow_seconds = false\n",
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.date_format(), DateFormat::Standard);
    assert!(!config.show_seconds());

    let path = write_config(temp_dir.path(), "date_format = \"lunar\"\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_partial_override() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        "animation_duration_ms = 800\nidle_threshold_ms = 60000\n",
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.animation_duration_ms(), 800);
    assert_eq!(config.idle_threshold_ms(), 60_000);
    assert_eq!(config.timer_period_ms(), DEFAULT_TIMER_PERIOD_MS);
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let err = load_from_path(&temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_malformed_toml_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "animation_duration_ms = \"fast\"\n");
    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
fn test_zero_duration_is_rejected() {
    let config = Config {
        animation_duration_ms: Some(0),
        ..Config::default()
    };
    let err = validate_config(&config).unwrap_err().to_string();
    assert!(err.contains("animation_duration_ms"));
    assert!(err.contains("between 50 and 10000"));
}

#[test]
fn test_invalid_value_in_file_names_field() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "timer_period_ms = 5\n");
    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("timer_period_ms (5 ms)"));
}

#[test]
fn test_frame_interval_must_not_exceed_timer_period() {
    let config = Config {
        timer_period_ms: Some(200),
        frame_interval_ms: Some(500),
        ..Config::default()
    };
    let err = validate_config(&config).unwrap_err().to_string();
    assert!(err.contains("must not exceed timer_period_ms"));

    let config = Config {
        timer_period_ms: Some(200),
        frame_interval_ms: Some(200),
        ..Config::default()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration_ms(300_000), "5m");
    assert_eq!(format_duration_ms(90_000), "1m 30s");
    assert_eq!(format_duration_ms(1_500), "1.5s");
    assert_eq!(format_duration_ms(2_000), "2s");
}

proptest! {
    #[test]
    fn prop_in_range_durations_validate(
        animation in MINIMUM_ANIMATION_DURATION_MS..=MAXIMUM_ANIMATION_DURATION_MS,
        idle in MINIMUM_IDLE_THRESHOLD_MS..=MAXIMUM_IDLE_THRESHOLD_MS,
    ) {
        let config = Config {
            animation_duration_ms: Some(animation),
            idle_threshold_ms: Some(idle),
            ..Config::default()
        };
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_out_of_range_animation_fails(
        animation in prop_oneof![
            0..MINIMUM_ANIMATION_DURATION_MS,
            (MAXIMUM_ANIMATION_DURATION_MS + 1)..u64::MAX,
        ],
    ) {
        let config = Config {
            animation_duration_ms: Some(animation),
            ..Config::default()
        };
        prop_assert!(validate_config(&config).is_err());
    }
}
