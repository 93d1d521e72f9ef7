//! Configuration system for runprov.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RUNPROV_*`)
//! 3. Private project config (`runprov.local.yaml`)
//! 4. Project config (`runprov.yaml`)
//! 5. User config (`~/.runprov/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use runprov::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("License: {:?}", config.license);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::{
    EnvironmentConfig, CRATE_DIR_ENV, DETECT_VERSION_ENV, LICENSE_ENV, USER_ENV,
    VERSION_TIMEOUT_ENV,
};
pub use loader::{
    default_data_dir, ConfigLoader, ConfigSource, LOCAL_CONFIG, PROJECT_CONFIG, USER_CONFIG,
};
pub use merger::ConfigMerger;
pub use schema::Config;
pub use validator::ConfigValidator;
