//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `RUNPROV_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// License override.
pub const LICENSE_ENV: &str = "RUNPROV_LICENSE";
/// Agent username override.
pub const USER_ENV: &str = "RUNPROV_USER";
/// Default crate root.
pub const CRATE_DIR_ENV: &str = "RUNPROV_CRATE_DIR";
/// Version detection timeout, in seconds.
pub const VERSION_TIMEOUT_ENV: &str = "RUNPROV_VERSION_TIMEOUT_SECONDS";
/// Version detection switch.
pub const DETECT_VERSION_ENV: &str = "RUNPROV_DETECT_VERSION";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use runprov::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(license) = Self::var(LICENSE_ENV) {
            config.license = Some(license);
        }

        if let Some(user) = Self::var(USER_ENV) {
            config.user = Some(user);
        }

        if let Some(dir) = Self::var(CRATE_DIR_ENV) {
            config.crate_dir = Some(PathBuf::from(dir));
        }

        if let Some(val) = Self::var(DETECT_VERSION_ENV) {
            config.detect_version = Some(Self::parse_bool(DETECT_VERSION_ENV, &val)?);
        }

        if let Some(seconds) = Self::var(VERSION_TIMEOUT_ENV) {
            config.version_timeout_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: VERSION_TIMEOUT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
