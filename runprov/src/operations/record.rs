//! Recording a program run into the provenance graph.
//!
//! Recording happens in two phases. [`RecordPlan::build_plan`] resolves
//! every path against the crate root, measures every file and derives all
//! identifiers without touching the document; any path outside the crate
//! root aborts here. [`PlanExecutor`] then applies the plan to the loaded
//! graph and persists it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::builders::{self, ActionFields};
use crate::graph::{format_timestamp, unique_links, EntityGraph};
use crate::identity;
use crate::mime;
use crate::path::{CratePathResolver, CrateRelativePath};
use crate::program::{ArgumentSource, IoArgument, IoArgumentNames, IoArguments, Program};
use crate::user;
use crate::version::{self, VersionStrategy, DEFAULT_VERSION_TIMEOUT};

use super::executor::{ExecutionResult, PlanExecutor};
use super::plan::{OperationPlan, PlanAction, RootUpdate};

/// Warning attached to plans that record no license.
pub const MISSING_LICENSE_WARNING: &str = "No dataset license specified for the RO-Crate. \
This will lead to invalid crates. Consider setting a license like 'CC-BY-4.0'.";

/// The current local time with its UTC offset.
#[must_use]
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Options for a recording.
///
/// # Examples
///
/// ```
/// use runprov::operations::{now, RecordOptions};
///
/// let options = RecordOptions::new("/work", ["myscript", "--input", "in.txt"], now())
///     .with_software_version("1.0.0")
///     .with_license("CC-BY-4.0");
/// assert_eq!(options.argv.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RecordOptions {
    /// Directory holding the provenance document.
    pub crate_root: PathBuf,

    /// The full command line, program name first.
    pub argv: Vec<String>,

    /// When the run started.
    pub start_time: DateTime<FixedOffset>,

    /// When the run ended; defaults to the time of planning.
    pub end_time: Option<DateTime<FixedOffset>>,

    /// Who ran it; defaults to the detected login name.
    pub current_user: Option<String>,

    /// Software version; detected when absent.
    pub software_version: Option<String>,

    /// License for the root dataset.
    pub license: Option<String>,

    /// Directory relative paths are resolved against; defaults to the
    /// working directory.
    pub base_dir: Option<PathBuf>,

    /// Whether to run `<program> --version` when no version is given.
    pub detect_version: bool,

    /// Upper bound for version detection.
    pub version_timeout: Duration,
}

impl RecordOptions {
    /// Creates options with the required fields and defaults elsewhere.
    #[must_use]
    pub fn new<I, S>(crate_root: impl Into<PathBuf>, argv: I, start_time: DateTime<FixedOffset>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            crate_root: crate_root.into(),
            argv: argv.into_iter().map(Into::into).collect(),
            start_time,
            end_time: None,
            current_user: None,
            software_version: None,
            license: None,
            base_dir: None,
            detect_version: true,
            version_timeout: DEFAULT_VERSION_TIMEOUT,
        }
    }

    /// Sets the end time.
    #[must_use]
    pub fn with_end_time(mut self, end_time: DateTime<FixedOffset>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Sets the agent username.
    #[must_use]
    pub fn with_current_user(mut self, user: impl Into<String>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    /// Sets the software version, skipping detection.
    #[must_use]
    pub fn with_software_version(mut self, version: impl Into<String>) -> Self {
        self.software_version = Some(version.into());
        self
    }

    /// Sets the dataset license.
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Resolve relative paths against `dir` instead of the working
    /// directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Enables or disables version detection.
    #[must_use]
    pub const fn with_detect_version(mut self, detect: bool) -> Self {
        self.detect_version = detect;
        self
    }

    /// Fill unset options from configuration.
    ///
    /// Values set explicitly on the options win over configuration.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        if self.license.is_none() {
            self.license.clone_from(&config.license);
        }
        if self.current_user.is_none() {
            self.current_user.clone_from(&config.user);
        }
        self.detect_version = self.detect_version && config.detect_version();
        self.version_timeout = config.version_timeout();
        self
    }
}

/// A recording plan generator.
///
/// # Examples
///
/// ```no_run
/// use runprov::operations::{now, PlanExecutor, RecordOptions, RecordPlan};
/// use runprov::graph::EntityGraph;
/// use runprov::{IoArgument, IoArguments, Program};
/// use std::path::Path;
///
/// let program = Program::new("myscript", "Example CLI");
/// let io = IoArguments {
///     input_files: vec![IoArgument::new("input", "/work/in.txt", "Input file")],
///     ..Default::default()
/// };
/// let options = RecordOptions::new("/work", ["myscript", "/work/in.txt"], now())
///     .with_software_version("1.0.0");
///
/// let plan = RecordPlan::new(&program, &io, &options).build_plan().unwrap();
/// let mut graph = EntityGraph::load(Path::new("/work")).unwrap();
/// PlanExecutor::new(&mut graph, Path::new("/work")).execute(&plan).unwrap();
/// ```
pub struct RecordPlan<'a> {
    program: &'a Program,
    io: &'a IoArguments,
    options: &'a RecordOptions,
    strategies: Option<Vec<Box<dyn VersionStrategy>>>,
}

impl<'a> RecordPlan<'a> {
    /// Creates a recording plan generator.
    #[must_use]
    pub fn new(program: &'a Program, io: &'a IoArguments, options: &'a RecordOptions) -> Self {
        Self {
            program,
            io,
            options,
            strategies: None,
        }
    }

    /// Replace the version detection strategies used when no version is
    /// given.
    #[must_use]
    pub fn with_version_strategies(mut self, strategies: Vec<Box<dyn VersionStrategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// The crate path resolver these options describe.
    ///
    /// # Errors
    ///
    /// Returns an error if the crate root cannot be normalized.
    pub fn resolver(&self) -> Result<CratePathResolver> {
        match &self.options.base_dir {
            Some(base) => CratePathResolver::with_base_dir(&self.options.crate_root, base),
            None => CratePathResolver::new(&self.options.crate_root),
        }
    }

    /// Builds the operation plan for this recording.
    ///
    /// Resolves and measures every path before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the command line is empty
    /// - any path lies outside the crate root
    /// - an input or output file does not exist
    /// - no user is given and none can be detected
    pub fn build_plan(&self) -> Result<OperationPlan> {
        let options = self.options;
        if options.argv.is_empty() {
            return Err(Error::validation(
                "argv",
                "Command line must contain at least the program name",
            ));
        }

        let resolver = self.resolver()?;
        let action_id = identity::action_id(&options.argv);

        let input_files = Self::plan_files(&resolver, &self.io.input_files)?;
        let output_files = Self::plan_files(&resolver, &self.io.output_files)?;
        let input_dirs = Self::plan_dirs(&resolver, &self.io.input_dirs)?;
        let output_dirs = Self::plan_dirs(&resolver, &self.io.output_dirs)?;

        let end_time = options.end_time.unwrap_or_else(now);
        let user = self.current_user()?;
        let software_version = self.software_version();

        let mut plan = OperationPlan::new(format!("Record {action_id}"));
        if options.license.as_deref().map_or(true, str::is_empty) {
            log::warn!("{MISSING_LICENSE_WARNING}");
            plan = plan.add_warning(MISSING_LICENSE_WARNING);
        }

        let program = self.program;
        let software_id = identity::software_id(&program.name, &software_version);
        plan = plan.add_action(PlanAction::ConformToProfile).add_action(
            PlanAction::AddSoftware(builders::software(
                &software_id,
                &program.name,
                &program.description,
                &software_version,
            )),
        );

        let mut data_ids = Vec::new();
        for (rel, help, size) in input_files.iter().chain(&output_files) {
            let id = rel.id();
            let format = mime::guess_encoding_format(Path::new(rel.relative()));
            plan = plan.add_action(PlanAction::UpsertFile(builders::file(
                &id, help, *size, format,
            )));
            data_ids.push(id);
        }
        for (rel, help) in input_dirs.iter().chain(&output_dirs) {
            let id = rel.id();
            let name = if rel.relative().is_empty() {
                id.clone()
            } else {
                rel.relative().to_string()
            };
            plan = plan.add_action(PlanAction::AddDirectory(builders::directory(
                &id, &name, help,
            )));
            data_ids.push(id);
        }

        let objects = unique_links(
            input_files
                .iter()
                .map(|(rel, ..)| rel.id())
                .chain(input_dirs.iter().map(|(rel, _)| rel.id())),
        );
        let results = unique_links(
            output_files
                .iter()
                .map(|(rel, ..)| rel.id())
                .chain(output_dirs.iter().map(|(rel, _)| rel.id())),
        );

        let agent_id = identity::agent_id(&user);
        plan = plan
            .add_action(PlanAction::AddAgent(builders::person(&agent_id)))
            .add_action(PlanAction::AddAction(builders::create_action(&ActionFields {
                id: &action_id,
                start_time: &options.start_time,
                end_time: &end_time,
                agent: &agent_id,
                instrument: &software_id,
                objects: &objects,
                results: &results,
            })))
            .add_action(PlanAction::UpdateRoot(RootUpdate {
                has_part: unique_links(&data_ids),
                date_published: format_timestamp(&end_time),
                license: options.license.clone().filter(|l| !l.is_empty()),
                default_name: format!("Files used by {}", program.name),
                default_description: format!(
                    "An RO-Crate recording the files and directories that were used as input or output by {}.",
                    program.name
                ),
            }));

        Ok(plan)
    }

    fn plan_files(
        resolver: &CratePathResolver,
        args: &[IoArgument],
    ) -> Result<Vec<(CrateRelativePath, String, u64)>> {
        args.iter()
            .map(|arg| {
                let rel = resolver.resolve_file(&arg.path)?;
                let size = Self::file_size(&arg.path, rel.absolute())?;
                Ok((rel, arg.help.clone(), size))
            })
            .collect()
    }

    fn plan_dirs(
        resolver: &CratePathResolver,
        args: &[IoArgument],
    ) -> Result<Vec<(CrateRelativePath, String)>> {
        args.iter()
            .map(|arg| Ok((resolver.resolve_directory(&arg.path)?, arg.help.clone())))
            .collect()
    }

    fn file_size(original: &Path, absolute: &Path) -> Result<u64> {
        match fs::metadata(absolute) {
            Ok(metadata) => Ok(metadata.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::PathNotFound {
                path: original.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(Error::PermissionDenied {
                path: original.to_path_buf(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn current_user(&self) -> Result<String> {
        match &self.options.current_user {
            Some(user) if !user.is_empty() => Ok(user.clone()),
            _ => user::current_user().ok_or_else(|| {
                Error::validation("user", "Cannot determine the current user; pass one explicitly")
            }),
        }
    }

    fn software_version(&self) -> String {
        if let Some(version) = self.options.software_version.as_ref().filter(|v| !v.is_empty()) {
            return version.clone();
        }
        if let Some(strategies) = &self.strategies {
            return version::detect_software_version(&self.program.name, strategies);
        }
        if !self.options.detect_version {
            return String::new();
        }
        let strategies = version::default_strategies(self.options.version_timeout);
        version::detect_software_version(&self.program.name, &strategies)
    }
}

/// Record one run of `program` into the document under the crate root.
///
/// Creates the crate root if needed, plans, loads the existing document,
/// applies the plan and writes the document back. Returns the document
/// path.
///
/// # Errors
///
/// Returns an error if planning fails (see [`RecordPlan::build_plan`]), the
/// existing document is malformed, or the document cannot be written. No
/// document is written when planning fails.
///
/// # Examples
///
/// ```no_run
/// use runprov::{record, IoArgument, IoArguments, Program, RecordOptions};
/// use runprov::operations::now;
///
/// let io = IoArguments {
///     output_files: vec![IoArgument::new("output", "out.txt", "Output file")],
///     ..Default::default()
/// };
/// let options = RecordOptions::new(".", ["myscript", "out.txt"], now())
///     .with_license("CC-BY-4.0");
/// let document = record(&Program::new("myscript", "Example"), &io, &options).unwrap();
/// println!("{}", document.display());
/// ```
pub fn record(program: &Program, io: &IoArguments, options: &RecordOptions) -> Result<PathBuf> {
    execute_record(RecordPlan::new(program, io, options))
}

/// Like [`record`], with explicit version detection strategies.
///
/// # Errors
///
/// See [`record`].
pub fn record_with_strategies(
    program: &Program,
    io: &IoArguments,
    options: &RecordOptions,
    strategies: Vec<Box<dyn VersionStrategy>>,
) -> Result<PathBuf> {
    execute_record(RecordPlan::new(program, io, options).with_version_strategies(strategies))
}

fn execute_record(planner: RecordPlan<'_>) -> Result<PathBuf> {
    let resolver = planner.resolver()?;
    let crate_root = resolver.root().to_path_buf();
    fs::create_dir_all(&crate_root)?;

    let plan = planner.build_plan()?;
    let mut graph = EntityGraph::load(&crate_root)?;
    let result: ExecutionResult = PlanExecutor::new(&mut graph, &crate_root).execute(&plan)?;

    log::debug!("{}: {} actions", plan.description, result.actions_taken.len());
    result.document.ok_or_else(|| {
        Error::validation("document", "Recording finished without writing a document")
    })
}

/// Record a run described by an argument parser adapter.
///
/// The program comes from `source`; `names` says which of its arguments are
/// input and output files and directories.
///
/// # Errors
///
/// See [`record`].
pub fn record_with<S: ArgumentSource + ?Sized>(
    source: &S,
    names: &IoArgumentNames,
    options: &RecordOptions,
) -> Result<PathBuf> {
    let program = source.program();
    let io = names.collect(source);
    record(&program, &io, options)
}
