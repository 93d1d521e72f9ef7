//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading runprov configuration files
//! from various locations with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration file name.
pub const PROJECT_CONFIG: &str = "runprov.yaml";

/// Private project configuration file name, usually git-ignored.
pub const LOCAL_CONFIG: &str = "runprov.local.yaml";

/// File name of the per-user configuration inside the data directory.
pub const USER_CONFIG: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use runprov::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `~/.runprov/config.yaml` (precedence 1)
    /// 2. Project `runprov.yaml` walking up from `working_dir` (precedence 2)
    /// 3. Project `runprov.local.yaml` (precedence 3)
    ///
    /// The `data_dir` parameter overrides where the user config is loaded
    /// from.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let Some(dir) = data_dir.map(Path::to_path_buf).or_else(default_data_dir) else {
            log::debug!("No home directory, skipping user configuration");
            return Ok(None);
        };
        let path = dir.join(USER_CONFIG);
        if !path.is_file() {
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            precedence: 1,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// The nearest directory holding either file wins; files further up are
    /// not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        for dir in start_dir.ancestors() {
            let found: Vec<(PathBuf, u8)> = [(PROJECT_CONFIG, 2), (LOCAL_CONFIG, 3)]
                .into_iter()
                .map(|(name, precedence)| (dir.join(name), precedence))
                .filter(|(path, _)| path.is_file())
                .collect();
            if found.is_empty() {
                continue;
            }

            log::debug!("Using project configuration from {}", dir.display());
            return found
                .into_iter()
                .map(|(path, precedence)| {
                    Self::load_file(&path).map(|config| ConfigSource {
                        path,
                        precedence,
                        config,
                    })
                })
                .collect();
        }

        Ok(Vec::new())
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }
}

/// The per-user data directory, `~/.runprov`.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".runprov"))
}
