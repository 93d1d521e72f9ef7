//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, PlaybackCommand, RecordCommand, RunCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Record command-line tool runs as RO-Crate provenance.
#[derive(Parser)]
#[command(name = "runprov")]
#[command(
    version,
    about = "Record command-line tool runs as RO-Crate provenance",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding ro-crate-metadata.json (default: configured
    /// `crate_dir`, else the current directory)
    #[arg(long, value_name = "PATH", global = true, env = "RUNPROV_CRATE_DIR")]
    pub crate_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Record a run that already happened
    Record(RecordCommand),

    /// Run a command and record it
    Run(RunCommand),

    /// Print recorded command lines in completion order
    Playback(PlaybackCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
