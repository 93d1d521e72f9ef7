#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # runprov
//!
//! A library for recording command-line tool runs as RO-Crate provenance.
//!
//! Every recorded run adds to one `ro-crate-metadata.json` document in a
//! crate root: the software that ran, who ran it, which files and
//! directories it read and wrote, and when. Repeated runs, possibly of
//! different tools, accumulate into a single history that can be played
//! back in order.
//!
//! ## Core Types
//!
//! - [`Program`], [`IoArgument`] and [`IoArguments`]: what was run and on
//!   which paths
//! - [`RecordOptions`] and [`record`]: recording a run
//! - [`graph::EntityGraph`]: the in-memory provenance document
//! - [`playback`]: the recorded command lines in completion order
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use runprov::operations::now;
//! use runprov::{playback, record, IoArgument, IoArguments, Program, RecordOptions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("in.txt"), "hello").unwrap();
//!
//! let io = IoArguments {
//!     input_files: vec![IoArgument::new("input", dir.path().join("in.txt"), "Input file")],
//!     ..Default::default()
//! };
//! let options = RecordOptions::new(dir.path(), ["myscript", "in.txt"], now())
//!     .with_current_user("alice")
//!     .with_software_version("1.0.0")
//!     .with_license("CC-BY-4.0");
//!
//! record(&Program::new("myscript", "Example CLI"), &io, &options).unwrap();
//! assert_eq!(playback(dir.path()).unwrap(), vec!["myscript in.txt"]);
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod graph;
pub mod identity;
pub mod logging;
pub mod mime;
pub mod operations;
pub mod path;
pub mod program;
pub mod user;
pub mod version;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    playback, playback_script, record, record_with, ExecutionResult, OperationPlan, PlanAction,
    PlanExecutor, RecordOptions, RecordPlan,
};
pub use path::{CratePathResolver, CrateRelativePath, PathKind, PathRelationship};
pub use program::{ArgumentSource, IoArgument, IoArgumentNames, IoArguments, Program};
