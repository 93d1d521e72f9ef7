//! Playback command implementation.
//!
//! This module implements the `playback` command, which prints the recorded
//! command lines of a crate in completion order.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_crate_dir, GlobalOptions};
use clap::{Args, ValueEnum};
use std::io::Write;

/// Print recorded command lines in completion order.
#[derive(Args)]
pub struct PlaybackCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "RUNPROV_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

/// Output format for the playback command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One command line per line, runnable as a shell script
    Text,
    /// JSON array of command lines
    Json,
}

impl PlaybackCommand {
    /// Execute the playback command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let crate_dir = resolve_crate_dir(global, &config)?;

        let commands = runprov::playback(&crate_dir)?;
        log::debug!(
            "{} recorded command(s) in {}",
            commands.len(),
            crate_dir.display()
        );

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Text => {
                for command in &commands {
                    writeln!(handle, "{command}")?;
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&commands)
                    .map_err(|e| CliError::Library(e.into()))?;
                writeln!(handle, "{json}")?;
            }
        }

        Ok(())
    }
}
