//! Library exports for runprov-cli.
//!
//! This module exports the CLI structure so the binary and the build
//! script share one definition.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
