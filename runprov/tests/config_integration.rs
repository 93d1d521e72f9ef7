//! Integration tests for the configuration system.
//!
//! Covers file discovery, layering of user and project files, environment
//! overrides and the hand-off from configuration to recording options.
//!
//! Tests that touch `RUNPROV_*` variables are `#[serial]`; everything else
//! runs in parallel.

mod common;

use common::{at, create_temp_dir, load_graph, START};
use runprov::config::{
    Config, ConfigBuilder, CRATE_DIR_ENV, DETECT_VERSION_ENV, LICENSE_ENV, USER_ENV,
    VERSION_TIMEOUT_ENV,
};
use runprov::graph::vocabulary::{property, ROOT_ID};
use runprov::{record, Error, IoArguments, Program, RecordOptions};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Test Utilities
// ============================================================================

fn write_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

fn clear_env() {
    for name in [
        LICENSE_ENV,
        USER_ENV,
        CRATE_DIR_ENV,
        VERSION_TIMEOUT_ENV,
        DETECT_VERSION_ENV,
    ] {
        env::remove_var(name);
    }
}

// ============================================================================
// File Layering
// ============================================================================

#[test]
fn test_project_overrides_user_config() {
    let temp = create_temp_dir();
    let data_dir = temp.path().join("data");
    let project = temp.path().join("project");
    write_config(&data_dir, "config.yaml", "license: MIT\nuser: alice\n");
    write_config(&project, "runprov.yaml", "license: CC-BY-4.0\n");

    let config = ConfigBuilder::new()
        .with_working_dir(&project)
        .with_data_dir(&data_dir)
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(config.license.as_deref(), Some("CC-BY-4.0"));
    assert_eq!(config.user.as_deref(), Some("alice"));
}

#[test]
fn test_local_overrides_project_config() {
    let temp = create_temp_dir();
    let project = temp.path().join("project");
    write_config(&project, "runprov.yaml", "license: CC-BY-4.0\nuser: alice\n");
    write_config(&project, "runprov.local.yaml", "user: bob\n");

    let config = ConfigBuilder::new()
        .with_working_dir(&project)
        .with_data_dir(&temp.path().join("no-data"))
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(config.license.as_deref(), Some("CC-BY-4.0"));
    assert_eq!(config.user.as_deref(), Some("bob"));
}

#[test]
fn test_project_config_found_from_subdirectory() {
    let temp = create_temp_dir();
    let project = temp.path().join("project");
    let nested = project.join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    write_config(&project, "runprov.yaml", "crate_dir: provenance\n");

    let config = ConfigBuilder::new()
        .with_working_dir(&nested)
        .with_data_dir(&temp.path().join("no-data"))
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(config.crate_dir, Some(PathBuf::from("provenance")));
}

#[test]
fn test_unknown_key_rejected() {
    let temp = create_temp_dir();
    write_config(temp.path(), "runprov.yaml", "licence: MIT\n");

    let err = ConfigBuilder::new()
        .with_working_dir(temp.path())
        .with_data_dir(&temp.path().join("no-data"))
        .skip_env()
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_invalid_timeout_rejected() {
    let temp = create_temp_dir();
    write_config(temp.path(), "runprov.yaml", "version_timeout_seconds: 0\n");

    let err = ConfigBuilder::new()
        .with_working_dir(temp.path())
        .with_data_dir(&temp.path().join("no-data"))
        .skip_env()
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_programmatic_override_wins() {
    let temp = create_temp_dir();
    write_config(temp.path(), "runprov.yaml", "license: MIT\n");

    let config = ConfigBuilder::new()
        .with_working_dir(temp.path())
        .with_data_dir(&temp.path().join("no-data"))
        .skip_env()
        .with_config(Config {
            license: Some("CC0-1.0".to_string()),
            ..Default::default()
        })
        .build()
        .unwrap();

    assert_eq!(config.license.as_deref(), Some("CC0-1.0"));
}

// ============================================================================
// Environment Overrides
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_files() {
    clear_env();
    let temp = create_temp_dir();
    write_config(
        temp.path(),
        "runprov.yaml",
        "license: MIT\ndetect_version: true\n",
    );
    env::set_var(LICENSE_ENV, "Apache-2.0");
    env::set_var(DETECT_VERSION_ENV, "off");
    env::set_var(VERSION_TIMEOUT_ENV, "12");

    let config = ConfigBuilder::new()
        .with_working_dir(temp.path())
        .with_data_dir(&temp.path().join("no-data"))
        .build();
    clear_env();
    let config = config.unwrap();

    assert_eq!(config.license.as_deref(), Some("Apache-2.0"));
    assert!(!config.detect_version());
    assert_eq!(config.version_timeout(), Duration::from_secs(12));
}

#[test]
#[serial]
fn test_empty_env_ignored() {
    clear_env();
    let temp = create_temp_dir();
    write_config(temp.path(), "runprov.yaml", "user: alice\n");
    env::set_var(USER_ENV, "");

    let config = ConfigBuilder::new()
        .with_working_dir(temp.path())
        .with_data_dir(&temp.path().join("no-data"))
        .build();
    clear_env();

    assert_eq!(config.unwrap().user.as_deref(), Some("alice"));
}

#[test]
#[serial]
fn test_malformed_env_rejected() {
    clear_env();
    let temp = create_temp_dir();
    env::set_var(VERSION_TIMEOUT_ENV, "soon");

    let result = ConfigBuilder::new()
        .with_working_dir(temp.path())
        .with_data_dir(&temp.path().join("no-data"))
        .build();
    clear_env();

    assert!(matches!(result, Err(Error::Validation { .. })));
}

// ============================================================================
// Configuration Into Recording
// ============================================================================

#[test]
fn test_config_fills_record_options() {
    let temp = create_temp_dir();
    let root = temp.path();
    let config = Config {
        license: Some("CC-BY-4.0".to_string()),
        user: Some("carol".to_string()),
        detect_version: Some(false),
        ..Default::default()
    };

    let options = RecordOptions::new(root, ["tool", "--run"], at(START))
        .with_base_dir(root)
        .with_config(&config);
    assert!(!options.detect_version);

    record(&Program::new("tool", ""), &IoArguments::default(), &options).unwrap();

    let graph = load_graph(root);
    assert!(graph.contains("carol"));
    // Detection disabled, so the software id carries no version.
    assert!(graph.contains("tool"));
    assert_eq!(
        graph.get(ROOT_ID).unwrap().get_str(property::LICENSE),
        Some("CC-BY-4.0")
    );
}

#[test]
fn test_explicit_options_beat_config() {
    let config = Config {
        license: Some("MIT".to_string()),
        user: Some("carol".to_string()),
        ..Default::default()
    };

    let options = RecordOptions::new("/work", ["tool"], at(START))
        .with_license("CC0-1.0")
        .with_current_user("dave")
        .with_config(&config);

    assert_eq!(options.license.as_deref(), Some("CC0-1.0"));
    assert_eq!(options.current_user.as_deref(), Some("dave"));
}
