//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::version::DEFAULT_VERSION_TIMEOUT;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields
/// fall back to the built-in defaults exposed by the accessor methods.
///
/// # Examples
///
/// ```
/// use runprov::config::Config;
///
/// let config = Config {
///     license: Some("CC-BY-4.0".to_string()),
///     ..Default::default()
/// };
/// assert!(config.detect_version());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// License recorded on the root dataset, e.g. `CC-BY-4.0`.
    pub license: Option<String>,

    /// Username recorded as the agent instead of the detected one.
    pub user: Option<String>,

    /// Crate root used when none is given on the command line.
    pub crate_dir: Option<PathBuf>,

    /// Whether to run `<program> --version` when no version is supplied.
    pub detect_version: Option<bool>,

    /// Upper bound for version detection, in seconds.
    pub version_timeout_seconds: Option<u64>,
}

impl Config {
    /// Whether version detection is enabled (default: yes).
    #[must_use]
    pub fn detect_version(&self) -> bool {
        self.detect_version.unwrap_or(true)
    }

    /// The version detection timeout (default: five seconds).
    #[must_use]
    pub fn version_timeout(&self) -> Duration {
        self.version_timeout_seconds
            .map_or(DEFAULT_VERSION_TIMEOUT, Duration::from_secs)
    }
}
