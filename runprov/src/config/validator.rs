//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Smallest accepted version detection timeout, in seconds.
pub const MIN_VERSION_TIMEOUT_SECONDS: u64 = 1;
/// Largest accepted version detection timeout, in seconds.
pub const MAX_VERSION_TIMEOUT_SECONDS: u64 = 300;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use runprov::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { version_timeout_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref license) = config.license {
            Self::validate_non_empty("license", license)?;
        }

        if let Some(ref user) = config.user {
            Self::validate_non_empty("user", user)?;
        }

        if let Some(ref dir) = config.crate_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::validation("crate_dir", "Cannot be empty"));
            }
        }

        if let Some(timeout) = config.version_timeout_seconds {
            if !(MIN_VERSION_TIMEOUT_SECONDS..=MAX_VERSION_TIMEOUT_SECONDS).contains(&timeout) {
                return Err(Error::validation(
                    "version_timeout_seconds",
                    format!(
                        "Must be between {MIN_VERSION_TIMEOUT_SECONDS} and {MAX_VERSION_TIMEOUT_SECONDS}, got {timeout}"
                    ),
                ));
            }
        }

        Ok(())
    }

    fn validate_non_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::validation(field, "Cannot be empty or only whitespace"));
        }
        Ok(())
    }
}
