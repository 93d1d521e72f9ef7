//! Build script for runprov-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("runprov")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Record command-line tool runs as RO-Crate provenance")
        .long_about(
            "Records which files and directories a command-line tool read and wrote, \
             who ran it and when, in an RO-Crate ro-crate-metadata.json document",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("crate-dir")
                .long("crate-dir")
                .help("Directory holding ro-crate-metadata.json")
                .value_name("PATH")
                .global(true)
                .env("RUNPROV_CRATE_DIR"),
        )
        .subcommands(vec![
            Command::new("record")
                .about("Record a run that already happened")
                .long_about("Record a finished run given its command line and the paths it used"),
            Command::new("run")
                .about("Run a command and record it")
                .long_about("Run a command, time it, and record it if it exits successfully"),
            Command::new("playback")
                .about("Print recorded command lines in completion order")
                .long_about("Print the recorded command lines of the crate, oldest first"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("runprov.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
