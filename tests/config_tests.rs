//! Integration tests for configuration management

use room_occupancy::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty());
    assert!(!config.paths.reports_dir.is_empty());
    assert!(config.paths.dataset.is_empty());
    assert_eq!(config.occupancy.default_teaching_weeks, 15);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/roomocc.log"
verbose = true

[paths]
reports_dir = "./reports"
dataset = "./campus.toml"

[occupancy]
default_teaching_weeks = 14
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/roomocc.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.paths.dataset, "./campus.toml");
    assert_eq!(config.occupancy.default_teaching_weeks, 14);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.dataset, "");
    assert_eq!(config.occupancy.default_teaching_weeks, 15);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$ROOMOCC/roomocc.log"

[paths]
reports_dir = "$ROOMOCC/reports"
dataset = "$ROOMOCC/campus.toml"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    for value in [
        &config.logging.file,
        &config.paths.reports_dir,
        &config.paths.dataset,
    ] {
        assert!(value.contains("roomocc"), "{value}");
        assert!(!value.contains("$ROOMOCC"), "{value}");
    }
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("dataset", "/data/campus.toml").expect("Failed to set dataset");
    assert_eq!(config.get("dataset").unwrap(), "/data/campus.toml");

    config.set("teaching-weeks", "13").expect("Failed to set weeks");
    assert_eq!(config.get("teaching_weeks").unwrap(), "13");

    assert!(config.set("teaching_weeks", "0").is_err());
    assert!(config.set("teaching_weeks", "60").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("teaching_weeks", "10").expect("Failed to set weeks");
    config.set("reports_dir", "/tmp/out").expect("Failed to set reports_dir");

    config
        .unset("teaching_weeks", &defaults)
        .expect("Failed to unset weeks");
    config
        .unset("reports-dir", &defaults)
        .expect("Failed to unset reports_dir");

    assert_eq!(config.occupancy.default_teaching_weeks, 15);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("teaching_weeks", "12").expect("Failed to set weeks");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.occupancy.default_teaching_weeks, 12);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        reports_dir: Some("./custom_reports".to_string()),
        dataset: Some("./campus.toml".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.paths.dataset, "./campus.toml");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.reports_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.reports_dir, before);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[occupancy]"));
    assert!(display_str.contains("default_teaching_weeks = 15"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"

[paths]
reports_dir = ""

[occupancy]
default_teaching_weeks = 0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.occupancy.default_teaching_weeks, 15);
    assert_eq!(config.logging.level, "error");
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
reports_dir = "/my/reports"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.reports_dir, "/my/reports");
}

#[test]
fn test_get_roomocc_dir() {
    let dir = Config::get_roomocc_dir();
    assert!(dir.ends_with("roomocc"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
