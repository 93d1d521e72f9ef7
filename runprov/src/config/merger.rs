//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use runprov::config::{Config, ConfigMerger};
///
/// let low = Config { license: Some("MIT".to_string()), ..Default::default() };
/// let high = Config { license: Some("CC-BY-4.0".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.license, Some("CC-BY-4.0".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.license.is_some() {
            target.license.clone_from(&source.license);
        }

        if source.user.is_some() {
            target.user.clone_from(&source.user);
        }

        if source.crate_dir.is_some() {
            target.crate_dir.clone_from(&source.crate_dir);
        }

        if source.detect_version.is_some() {
            target.detect_version = source.detect_version;
        }

        if source.version_timeout_seconds.is_some() {
            target.version_timeout_seconds = source.version_timeout_seconds;
        }
    }
}
