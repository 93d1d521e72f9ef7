//! Record command implementation.
//!
//! This module implements the `record` command, which records a run that
//! already happened, and the flags it shares with `run`.

use crate::error::CliError;
use crate::utils::{
    default_program_name, load_configuration, parse_timestamp, resolve_crate_dir, GlobalOptions,
};
use chrono::{DateTime, FixedOffset};
use clap::Args;
use runprov::graph::EntityGraph;
use runprov::operations::now;
use runprov::{
    record, Config, IoArgument, IoArguments, PlanExecutor, Program, RecordOptions, RecordPlan,
};
use std::path::{Path, PathBuf};

/// Describes the program and the paths a run used.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordFlags {
    /// Name the program is recorded under (default: file name of the
    /// first command-line token)
    #[arg(long, value_name = "NAME")]
    pub program: Option<String>,

    /// One-line description of the program
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Program version (default: detected via `<program> --version`)
    #[arg(long, value_name = "VERSION")]
    pub software_version: Option<String>,

    /// Do not run `<program> --version` to detect the version
    #[arg(long)]
    pub no_detect_version: bool,

    /// License of the crate, e.g. CC-BY-4.0
    #[arg(long, value_name = "LICENSE")]
    pub license: Option<String>,

    /// Username recorded as the agent (default: the login name)
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// File the program read
    #[arg(long, value_name = "PATH")]
    pub input_file: Vec<PathBuf>,

    /// File the program wrote
    #[arg(long, value_name = "PATH")]
    pub output_file: Vec<PathBuf>,

    /// Directory the program read
    #[arg(long, value_name = "PATH")]
    pub input_dir: Vec<PathBuf>,

    /// Directory the program wrote
    #[arg(long, value_name = "PATH")]
    pub output_dir: Vec<PathBuf>,
}

impl RecordFlags {
    /// The program description for a command line.
    pub fn program(&self, argv: &[String]) -> Result<Program, CliError> {
        let name = match (&self.program, argv.first()) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(argv0)) => default_program_name(argv0),
            _ => {
                return Err(CliError::InvalidArguments(
                    "A command line is required after `--`".to_string(),
                ))
            }
        };
        Ok(Program::new(name, self.description.as_str()))
    }

    /// The paths given on the command line.
    pub fn io(&self) -> IoArguments {
        fn arguments(name: &str, paths: &[PathBuf], help: &str) -> Vec<IoArgument> {
            paths
                .iter()
                .map(|path| IoArgument::new(name, path.as_path(), help))
                .collect()
        }

        IoArguments {
            input_files: arguments("input-file", &self.input_file, "Input file"),
            output_files: arguments("output-file", &self.output_file, "Output file"),
            input_dirs: arguments("input-dir", &self.input_dir, ""),
            output_dirs: arguments("output-dir", &self.output_dir, ""),
        }
    }

    /// Recording options: flags first, then configuration.
    pub fn options(
        &self,
        crate_dir: &Path,
        argv: &[String],
        start_time: DateTime<FixedOffset>,
        end_time: Option<DateTime<FixedOffset>>,
        config: &Config,
    ) -> RecordOptions {
        let mut options = RecordOptions::new(crate_dir, argv.iter().cloned(), start_time);
        if let Some(end) = end_time {
            options = options.with_end_time(end);
        }
        if let Some(version) = &self.software_version {
            options = options.with_software_version(version.as_str());
        }
        if let Some(license) = &self.license {
            options = options.with_license(license.as_str());
        }
        if let Some(user) = &self.user {
            options = options.with_current_user(user.as_str());
        }
        let options = options.with_config(config);
        if self.no_detect_version {
            options.with_detect_version(false)
        } else {
            options
        }
    }
}

/// Record a run that already happened.
#[derive(Args)]
pub struct RecordCommand {
    #[command(flatten)]
    pub flags: RecordFlags,

    /// When the run started, RFC 3339 (default: now)
    #[arg(long, value_name = "TIME", value_parser = parse_timestamp)]
    pub start_time: Option<DateTime<FixedOffset>>,

    /// When the run ended, RFC 3339 (default: now)
    #[arg(long, value_name = "TIME", value_parser = parse_timestamp)]
    pub end_time: Option<DateTime<FixedOffset>>,

    /// Show what would be recorded without writing the document
    #[arg(long)]
    pub dry_run: bool,

    /// The command line that ran, program first
    #[arg(last = true, required = true, value_name = "ARGV")]
    pub argv: Vec<String>,
}

impl RecordCommand {
    /// Execute the record command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and locate the crate
        let config = load_configuration(global)?;
        let crate_dir = resolve_crate_dir(global, &config)?;

        // 2. Describe the run
        let program = self.flags.program(&self.argv)?;
        let io = self.flags.io();
        let start_time = self.start_time.unwrap_or_else(now);
        let options =
            self.flags
                .options(&crate_dir, &self.argv, start_time, self.end_time, &config);

        // 3. Plan only, or record
        if self.dry_run {
            let plan = RecordPlan::new(&program, &io, &options).build_plan()?;
            let mut graph = EntityGraph::load(&crate_dir)?;
            let result = PlanExecutor::new(&mut graph, &crate_dir)
                .dry_run()
                .execute(&plan)?;
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in result.actions_taken.iter().enumerate() {
                    eprintln!("  {}. {action}", i + 1);
                }
            }
            return Ok(());
        }

        let document = record(&program, &io, &options)?;
        println!("{}", document.display());
        Ok(())
    }
}
