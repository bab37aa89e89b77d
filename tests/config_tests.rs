//! Tests for persisted options at the well-known path.
//!
//! These mutate `PACKWRIGHT_CONFIG_DIR`, which is process-global, so they
//! run serially.

use packwright::config;
use packwright::{BuildOptions, OutputMode};
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_fresh_environment_loads_default_options() {
    let temp = TempDir::new().unwrap();
    std::env::set_var("PACKWRIGHT_CONFIG_DIR", temp.path());

    let options = config::load_options().unwrap();
    assert_eq!(options, BuildOptions::default());
    assert_eq!(options.output_mode, OutputMode::SingleFile);

    std::env::remove_var("PACKWRIGHT_CONFIG_DIR");
}

#[test]
#[serial]
fn test_saved_options_come_back_from_well_known_path() {
    let temp = TempDir::new().unwrap();
    std::env::set_var("PACKWRIGHT_CONFIG_DIR", temp.path());

    let options = BuildOptions {
        output_mode: OutputMode::Directory,
        icon_path: Some(PathBuf::from("app.ico")),
        extra_data: None,
        verbose: true,
    };
    config::save_options(&options).unwrap();

    assert!(config::options_path().starts_with(temp.path()));
    assert_eq!(config::load_options().unwrap(), options);

    std::env::remove_var("PACKWRIGHT_CONFIG_DIR");
}
