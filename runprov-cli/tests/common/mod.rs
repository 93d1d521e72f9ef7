//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with an isolated crate and home directory
//! - Command builder helpers for common patterns
//! - Readers for the resulting document

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into tests.
const HOST_VARS: [&str; 7] = [
    "RUNPROV_LICENSE",
    "RUNPROV_USER",
    "RUNPROV_CRATE_DIR",
    "RUNPROV_VERSION_TIMEOUT_SECONDS",
    "RUNPROV_DETECT_VERSION",
    "RUNPROV_LOG_MODE",
    "RUNPROV_OUTPUT_FORMAT",
];

/// Test environment with an isolated crate directory.
///
/// Commands run with the crate directory as working directory, `HOME`
/// pointed at an empty directory, user `alice`, and version detection off.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// The crate root
    pub crate_dir: PathBuf,
    /// Stand-in home directory
    pub home_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let crate_dir = temp_dir.path().join("crate");
        let home_dir = temp_dir.path().join("home");
        fs::create_dir_all(&crate_dir).expect("Failed to create crate dir");
        fs::create_dir_all(&home_dir).expect("Failed to create home dir");

        Self {
            temp_dir,
            crate_dir,
            home_dir,
        }
    }

    /// A command with the isolated environment but no crate flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("runprov").expect("Failed to find runprov binary");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.crate_dir)
            .env("HOME", &self.home_dir)
            .env("RUNPROV_USER", "alice")
            .env("RUNPROV_DETECT_VERSION", "false");
        cmd
    }

    /// A command with `--crate-dir` set to this environment's crate.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--crate-dir").arg(&self.crate_dir);
        cmd
    }

    /// Path to the crate root.
    pub fn path(&self) -> &Path {
        &self.crate_dir
    }

    /// Write a file under the crate root.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.crate_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Location of the provenance document.
    pub fn document_path(&self) -> PathBuf {
        self.crate_dir.join("ro-crate-metadata.json")
    }

    /// Parse the provenance document.
    pub fn document(&self) -> Value {
        let text = fs::read_to_string(self.document_path()).expect("Failed to read document");
        serde_json::from_str(&text).expect("Document is not valid JSON")
    }

    /// The entity with `id`, if present.
    pub fn entity(&self, id: &str) -> Option<Value> {
        self.document()["@graph"]
            .as_array()
            .expect("@graph is not an array")
            .iter()
            .find(|entity| entity["@id"] == id)
            .cloned()
    }

    /// Number of entities whose `@type` is `type_name`.
    pub fn count_of_type(&self, type_name: &str) -> usize {
        self.document()["@graph"]
            .as_array()
            .expect("@graph is not an array")
            .iter()
            .filter(|entity| entity["@type"] == type_name)
            .count()
    }

    /// Record a run with fixed times and a license.
    ///
    /// # Panics
    /// Panics if the record command fails.
    pub fn record(&self, argv: &[&str], extra: &[&str], end_time: &str) {
        self.command()
            .arg("record")
            .args(["--license", "CC-BY-4.0", "--software-version", "1.0.0"])
            .args(["--start-time", "2026-01-16T12:00:00+00:00"])
            .args(["--end-time", end_time])
            .args(extra)
            .arg("--")
            .args(argv)
            .assert()
            .success();
    }
}
