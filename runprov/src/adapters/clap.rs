//! [`ArgumentSource`] over a `clap` command and its parsed matches.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::{ArgMatches, Command};

use crate::error::Result;
use crate::operations::RecordOptions;
use crate::program::{ArgumentSource, IoArgument, IoArgumentNames, Program};

/// Value meaning stdin or stdout rather than a file.
const STDIO_MARKER: &str = "-";

/// Reads program metadata and path arguments from `clap`.
///
/// Arguments of invoked subcommands are visible too; when a subcommand and
/// its parent both define an argument with the same id, the subcommand's
/// value wins.
///
/// # Examples
///
/// ```
/// use clap::{Arg, ArgAction, Command};
/// use runprov::adapters::clap::ClapArguments;
/// use runprov::ArgumentSource;
///
/// let command = Command::new("myscript")
///     .about("Example CLI")
///     .arg(Arg::new("input").long("input").help("Input file").action(ArgAction::Append));
/// let matches = command
///     .clone()
///     .get_matches_from(["myscript", "--input", "a.txt", "--input", "-"]);
///
/// let source = ClapArguments::new(&command, &matches);
/// assert_eq!(source.program().description, "Example CLI");
/// let paths = source.paths("input");
/// assert_eq!(paths.len(), 1);
/// assert_eq!(paths[0].help, "Input file");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClapArguments<'a> {
    command: &'a Command,
    matches: &'a ArgMatches,
}

impl<'a> ClapArguments<'a> {
    /// Wrap a command definition and the matches it produced.
    #[must_use]
    pub const fn new(command: &'a Command, matches: &'a ArgMatches) -> Self {
        Self { command, matches }
    }

    /// The command and matches of every invoked level, outermost first.
    fn chain(&self) -> Vec<(&'a Command, &'a ArgMatches)> {
        let mut levels = vec![(self.command, self.matches)];
        let (mut command, mut matches) = (self.command, self.matches);
        while let Some((name, sub_matches)) = matches.subcommand() {
            let Some(sub_command) = command.find_subcommand(name) else {
                break;
            };
            levels.push((sub_command, sub_matches));
            command = sub_command;
            matches = sub_matches;
        }
        levels
    }

    fn describe(command: &Command) -> Program {
        let description = command
            .get_about()
            .or_else(|| command.get_long_about())
            .map(ToString::to_string)
            .unwrap_or_default();
        Program::new(command.get_name(), description)
    }

    fn values(command: &Command, matches: &ArgMatches, name: &str) -> Option<Vec<IoArgument>> {
        let raw = matches.try_get_raw(name).ok()??;
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == name)
            .and_then(|arg| arg.get_help().or_else(|| arg.get_long_help()))
            .map(ToString::to_string)
            .unwrap_or_default();

        Some(
            raw.filter(|value| *value != OsStr::new(STDIO_MARKER))
                .map(|value| IoArgument::new(name, PathBuf::from(value), help.clone()))
                .collect(),
        )
    }
}

impl ArgumentSource for ClapArguments<'_> {
    fn program(&self) -> Program {
        let levels = self.chain();
        let mut nested: Option<Program> = None;
        for (command, _) in levels.iter().rev() {
            let mut program = Self::describe(command);
            if let Some(child) = nested.take() {
                program = program.with_subcommand(child.name.clone(), child);
            }
            nested = Some(program);
        }
        nested.unwrap_or_else(|| Self::describe(self.command))
    }

    fn paths(&self, name: &str) -> Vec<IoArgument> {
        self.chain()
            .iter()
            .rev()
            .find_map(|(command, matches)| Self::values(command, matches, name))
            .unwrap_or_default()
    }
}

/// Record a run parsed by `clap`.
///
/// # Errors
///
/// See [`record`](crate::record).
pub fn record_with_clap(
    command: &Command,
    matches: &ArgMatches,
    names: &IoArgumentNames,
    options: &RecordOptions,
) -> Result<PathBuf> {
    crate::record_with(&ClapArguments::new(command, matches), names, options)
}
