//! Integration tests for layered settings loading.
//!
//! These run against temp directories only, never the real global config.

use std::fs;

use tempfile::TempDir;

use mansion::application::ApplicationError;
use mansion::config::Settings;
use mansion::domain::Mode;

#[test]
fn given_global_and_local_config_when_load_then_local_wins_per_field() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let local = dir.path().join("local.toml");
    fs::write(&global, "mode = \"explore\"\nmap_file = \"/maps/global.toml\"\n").unwrap();
    fs::write(&local, "map_file = \"/maps/local.toml\"\n").unwrap();

    let settings = Settings::load_from(Some(&global), Some(&local)).expect("load settings");

    assert_eq!(settings.mode, Mode::Explore, "global value kept");
    assert_eq!(
        settings.map_file.as_deref(),
        Some(std::path::Path::new("/maps/local.toml")),
        "local value wins"
    );
}

#[test]
fn given_missing_global_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("absent.toml");

    let settings = Settings::load_from(Some(&global), None).expect("load settings");

    assert_eq!(settings.mode, Mode::Investigate);
    assert!(settings.map_file.is_none());
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("absent.toml");

    let err = Settings::load_from(None, Some(&local)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "got {err:?}");
}

#[test]
fn given_invalid_mode_in_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.toml");
    fs::write(&local, "mode = \"wander\"\n").unwrap();

    let err = Settings::load_from(None, Some(&local)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "got {err:?}");
}

#[test]
fn given_show_neighbors_env_when_load_then_valid_overrides_and_malformed_errors() {
    // Only this test touches MANSION_SHOW_NEIGHBORS, so both cases share it
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.toml");
    fs::write(&local, "show_neighbors = true\n").unwrap();

    std::env::set_var("MANSION_SHOW_NEIGHBORS", "false");
    let valid = Settings::load_from(None, Some(&local));
    std::env::set_var("MANSION_SHOW_NEIGHBORS", "maybe");
    let malformed = Settings::load_from(None, Some(&local));
    std::env::remove_var("MANSION_SHOW_NEIGHBORS");

    assert!(!valid.expect("load settings").show_neighbors, "env wins over files");
    assert!(
        matches!(malformed, Err(ApplicationError::Config { .. })),
        "got {malformed:?}"
    );
}

#[test]
fn given_effective_settings_when_rendered_then_loadable_again() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.toml");
    let settings = Settings {
        mode: Mode::Explore,
        map_file: Some(dir.path().join("manor.toml")),
        show_neighbors: true,
    };
    fs::write(&local, settings.to_toml().unwrap()).unwrap();

    let reloaded = Settings::load_from(None, Some(&local)).unwrap();

    assert_eq!(reloaded.mode, Mode::Explore);
    assert_eq!(reloaded.map_file, settings.map_file);
}
