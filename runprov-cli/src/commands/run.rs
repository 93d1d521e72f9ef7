//! Run command implementation.
//!
//! This module implements the `run` command, which runs a command with
//! inherited stdio, times it, and records it if it succeeds.

use crate::commands::RecordFlags;
use crate::error::CliError;
use crate::utils::{load_configuration, resolve_crate_dir, GlobalOptions};
use clap::Args;
use runprov::operations::now;
use runprov::record;
use std::io;
use std::process::{Command, ExitStatus};

/// Run a command and record it.
#[derive(Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub flags: RecordFlags,

    /// The command to run, program first
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl RunCommand {
    /// Execute the run command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and locate the crate before running anything
        let config = load_configuration(global)?;
        let crate_dir = resolve_crate_dir(global, &config)?;
        let program = self.flags.program(&self.command)?;

        // 2. Run
        let start_time = now();
        let status = self.spawn()?;
        let end_time = now();

        if !status.success() {
            let code = status.code().unwrap_or(1);
            log::warn!("'{}' exited with {status}", program.name);
            return Err(CliError::ChildFailed(code));
        }

        // 3. Record
        let options = self.flags.options(
            &crate_dir,
            &self.command,
            start_time,
            Some(end_time),
            &config,
        );
        let document = record(&program, &self.flags.io(), &options)?;
        if !global.quiet {
            // stdout belongs to the wrapped command
            eprintln!("Recorded run in {}", document.display());
        }
        Ok(())
    }

    fn spawn(&self) -> Result<ExitStatus, CliError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| CliError::InvalidArguments("No command given".to_string()))?;

        log::debug!("Running {}", self.command.join(" "));
        Command::new(program).args(args).status().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CliError::InvalidArguments(format!("Command not found: {program}"))
            } else {
                CliError::Io(e)
            }
        })
    }
}
