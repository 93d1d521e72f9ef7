//! Descriptions of the instrumented program and its path arguments.
//!
//! Argument parsers plug in through [`ArgumentSource`]: an adapter reports
//! the program's name and description and, for a given argument name, the
//! path values that were supplied. [`IoArgumentNames`] then sorts those
//! values into the four groups a recording needs.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// The program being recorded.
///
/// # Examples
///
/// ```
/// use runprov::Program;
///
/// let program = Program::new("myscript", "Example CLI")
///     .with_subcommand("convert", Program::new("convert", "Convert a file"));
/// assert_eq!(program.name, "myscript");
/// assert!(program.subcommands.contains_key("convert"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Program name, used for the software entity and the default crate
    /// name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Invoked subcommands keyed by name.
    pub subcommands: BTreeMap<String, Program>,
}

impl Program {
    /// Create a program without subcommands.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            subcommands: BTreeMap::new(),
        }
    }

    /// Attach a subcommand.
    #[must_use]
    pub fn with_subcommand(mut self, name: impl Into<String>, program: Program) -> Self {
        self.subcommands.insert(name.into(), program);
        self
    }
}

/// One path value supplied for a named argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoArgument {
    /// Logical argument name as known to the parser.
    pub name: String,
    /// The path as supplied; relative paths are resolved later.
    pub path: PathBuf,
    /// Help text of the argument, used as the entity description.
    pub help: String,
}

impl IoArgument {
    /// Create an argument value.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            help: help.into(),
        }
    }
}

/// The files and directories a single invocation read and wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoArguments {
    /// Files read.
    pub input_files: Vec<IoArgument>,
    /// Files written.
    pub output_files: Vec<IoArgument>,
    /// Directories read.
    pub input_dirs: Vec<IoArgument>,
    /// Directories written.
    pub output_dirs: Vec<IoArgument>,
}

impl IoArguments {
    /// Whether no paths at all were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input_files.is_empty()
            && self.output_files.is_empty()
            && self.input_dirs.is_empty()
            && self.output_dirs.is_empty()
    }
}

/// Access to a parsed command line.
///
/// Implementations must not report `-` (stdin/stdout) as a path.
pub trait ArgumentSource {
    /// The invoked program, including the chain of invoked subcommands.
    fn program(&self) -> Program;

    /// Path values supplied for argument `name`, in command-line order.
    /// Unknown or absent arguments yield an empty list.
    fn paths(&self, name: &str) -> Vec<IoArgument>;
}

/// Which argument names hold input/output files and directories.
///
/// # Examples
///
/// ```
/// use runprov::IoArgumentNames;
///
/// let names = IoArgumentNames::new()
///     .with_input_files(["input"])
///     .with_output_files(["output"]);
/// assert_eq!(names.input_files, vec!["input"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoArgumentNames {
    /// Arguments naming input files.
    pub input_files: Vec<String>,
    /// Arguments naming output files.
    pub output_files: Vec<String>,
    /// Arguments naming input directories.
    pub input_dirs: Vec<String>,
    /// Arguments naming output directories.
    pub output_dirs: Vec<String>,
}

fn to_strings<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

impl IoArgumentNames {
    /// No argument names in any group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file argument names.
    #[must_use]
    pub fn with_input_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_files = to_strings(names);
        self
    }

    /// Set the output file argument names.
    #[must_use]
    pub fn with_output_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_files = to_strings(names);
        self
    }

    /// Set the input directory argument names.
    #[must_use]
    pub fn with_input_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_dirs = to_strings(names);
        self
    }

    /// Set the output directory argument names.
    #[must_use]
    pub fn with_output_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_dirs = to_strings(names);
        self
    }

    /// Look up every named argument in `source` and group the values.
    ///
    /// Within a group, values follow the order of the names and then the
    /// command-line order of each argument.
    pub fn collect<S: ArgumentSource + ?Sized>(&self, source: &S) -> IoArguments {
        let gather = |names: &[String]| -> Vec<IoArgument> {
            names.iter().flat_map(|name| source.paths(name)).collect()
        };
        IoArguments {
            input_files: gather(&self.input_files),
            output_files: gather(&self.output_files),
            input_dirs: gather(&self.input_dirs),
            output_dirs: gather(&self.output_dirs),
        }
    }
}
