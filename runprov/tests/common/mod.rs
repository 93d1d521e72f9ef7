//! Common test utilities for integration tests.
//!
//! This module provides shared helpers for creating temporary crate roots,
//! building recording options and reading the persisted document back.

use chrono::{DateTime, FixedOffset};
use runprov::graph::{metadata_path, EntityGraph};
use runprov::{IoArgument, IoArguments, Program, RecordOptions};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default start time used by fixtures.
#[allow(dead_code)]
pub const START: &str = "2026-01-16T12:00:00+00:00";

/// Default end time used by fixtures.
#[allow(dead_code)]
pub const END: &str = "2026-01-16T12:00:05+00:00";

/// Create a temporary directory to serve as a crate root.
#[allow(dead_code)]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Parse an RFC 3339 timestamp.
#[allow(dead_code)]
pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("Invalid test timestamp")
}

/// Write `contents` to `root/relative`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Load the persisted graph of a crate root.
#[allow(dead_code)]
pub fn load_graph(root: &Path) -> EntityGraph {
    EntityGraph::load(root).expect("Failed to load document")
}

/// Read the persisted document as raw JSON.
#[allow(dead_code)]
pub fn read_document(root: &Path) -> Value {
    let text = fs::read_to_string(metadata_path(root)).expect("Failed to read document");
    serde_json::from_str(&text).expect("Document is not valid JSON")
}

/// Number of entities in `graph` carrying `type_name`.
#[allow(dead_code)]
pub fn count_of_type(graph: &EntityGraph, type_name: &str) -> usize {
    graph.entities_of_type(type_name).count()
}

/// Builder for recording fixtures.
///
/// Defaults:
/// - program: `myscript` ("Example CLI")
/// - argv: the program name only
/// - times: [`START`] and [`END`]
/// - user: `alice`
/// - version: `1.0.0`
/// - license: `CC-BY-4.0`
/// - relative paths resolve against the crate root
#[allow(dead_code)]
pub struct RecordFixture {
    root: PathBuf,
    program: Program,
    argv: Vec<String>,
    io: IoArguments,
    start: String,
    end: String,
    user: String,
    version: String,
    license: Option<String>,
}

#[allow(dead_code)]
impl RecordFixture {
    /// Start a fixture recording into `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            program: Program::new("myscript", "Example CLI"),
            argv: vec!["myscript".to_string()],
            io: IoArguments::default(),
            start: START.to_string(),
            end: END.to_string(),
            user: "alice".to_string(),
            version: "1.0.0".to_string(),
            license: Some("CC-BY-4.0".to_string()),
        }
    }

    pub fn with_program(mut self, name: &str, description: &str) -> Self {
        self.program = Program::new(name, description);
        self
    }

    pub fn with_argv(mut self, argv: &[&str]) -> Self {
        self.argv = argv.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_input_file(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.io
            .input_files
            .push(IoArgument::new(name, path, format!("The {name} file")));
        self
    }

    pub fn with_output_file(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.io
            .output_files
            .push(IoArgument::new(name, path, format!("The {name} file")));
        self
    }

    pub fn with_input_dir(mut self, name: &str, path: impl Into<PathBuf>, help: &str) -> Self {
        self.io.input_dirs.push(IoArgument::new(name, path, help));
        self
    }

    pub fn with_output_dir(mut self, name: &str, path: impl Into<PathBuf>, help: &str) -> Self {
        self.io.output_dirs.push(IoArgument::new(name, path, help));
        self
    }

    pub fn with_times(mut self, start: &str, end: &str) -> Self {
        self.start = start.to_string();
        self.end = end.to_string();
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = user.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn without_license(mut self) -> Self {
        self.license = None;
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn io(&self) -> &IoArguments {
        &self.io
    }

    pub fn options(&self) -> RecordOptions {
        let options = RecordOptions::new(&self.root, self.argv.iter().cloned(), at(&self.start))
            .with_end_time(at(&self.end))
            .with_current_user(self.user.as_str())
            .with_software_version(self.version.as_str())
            .with_detect_version(false)
            .with_base_dir(&self.root);
        match &self.license {
            Some(license) => options.with_license(license.as_str()),
            None => options,
        }
    }

    /// Record the fixture, returning the document path.
    pub fn record(&self) -> runprov::Result<PathBuf> {
        runprov::record(&self.program, &self.io, &self.options())
    }
}
