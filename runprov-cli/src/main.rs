//! Main entry point for the runprov CLI.
//!
//! Commands:
//! - `record`: Record a run that already happened
//! - `run`: Run a command and record it
//! - `playback`: Print recorded command lines in completion order
//! - `completions`: Generate shell completion scripts

use clap::Parser;
use runprov_cli::cli::{Cli, Command};
use runprov_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Library diagnostics go through the `log` facade
    runprov::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        crate_dir: cli.crate_dir,
    };

    let result = match cli.command {
        Command::Record(cmd) => cmd.execute(&global),
        Command::Run(cmd) => cmd.execute(&global),
        Command::Playback(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
