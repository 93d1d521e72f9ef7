//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including crate directory resolution, configuration loading and
//! timestamp parsing.

use crate::error::CliError;
use chrono::{DateTime, FixedOffset};
use runprov::path::normalize;
use runprov::{Config, ConfigBuilder};
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the crate directory.
    pub crate_dir: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project configuration files (found from the current directory)
/// 3. User configuration file
/// 4. Built-in defaults (lowest priority)
///
/// Command-line flags are applied on top by each command.
pub fn load_configuration(_global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the crate directory.
///
/// Priority: `--crate-dir` (or `RUNPROV_CRATE_DIR`) > configured
/// `crate_dir` > current directory. The result is absolute.
pub fn resolve_crate_dir(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    let dir = match global.crate_dir.as_ref().or(config.crate_dir.as_ref()) {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };
    normalize_path(&dir)
}

/// Normalize a path (make absolute, expand ~, etc.) without following symlinks.
pub fn normalize_path(path: &Path) -> Result<PathBuf, CliError> {
    normalize::normalize(path).map_err(CliError::from)
}

/// Parse an RFC 3339 timestamp such as `2026-01-16T12:00:00+01:00`.
///
/// Used as a clap value parser.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2026-01-16T12:00:00+00:00 ({e})"))
}

/// The name a program is recorded under when none is given: the file name
/// of the first command-line token.
pub fn default_program_name(argv0: &str) -> String {
    Path::new(argv0)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(argv0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_keeps_offset() {
        let ts = parse_timestamp("2026-01-16T12:00:00+02:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_default_program_name() {
        assert_eq!(default_program_name("/usr/bin/myscript"), "myscript");
        assert_eq!(default_program_name("./tool.sh"), "tool.sh");
        assert_eq!(default_program_name("plain"), "plain");
    }

    #[test]
    fn test_explicit_crate_dir_wins() {
        let global = GlobalOptions {
            crate_dir: Some(PathBuf::from("/work/crate")),
            ..Default::default()
        };
        let config = Config {
            crate_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        };
        assert_eq!(
            resolve_crate_dir(&global, &config).unwrap(),
            PathBuf::from("/work/crate")
        );
    }

    #[test]
    fn test_configured_crate_dir_used() {
        let config = Config {
            crate_dir: Some(PathBuf::from("/srv/provenance")),
            ..Default::default()
        };
        assert_eq!(
            resolve_crate_dir(&GlobalOptions::default(), &config).unwrap(),
            PathBuf::from("/srv/provenance")
        );
    }
}
