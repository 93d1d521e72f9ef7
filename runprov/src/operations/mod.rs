//! Recording and playback using the plan-execute pattern.
//!
//! Recording is split into two phases:
//! 1. **Planning**: resolves paths, measures files, derives identifiers and
//!    builds a plan. Nothing is written.
//! 2. **Execution**: applies the plan to the loaded graph and persists it.
//!
//! Playback is a read-only consumer of the persisted document.
//!
//! # Examples
//!
//! ```no_run
//! use runprov::graph::EntityGraph;
//! use runprov::operations::{now, PlanExecutor, RecordOptions, RecordPlan};
//! use runprov::{IoArguments, Program};
//! use std::path::Path;
//!
//! let root = Path::new("/work");
//! let program = Program::new("myscript", "Example CLI");
//! let io = IoArguments::default();
//! let options = RecordOptions::new(root, ["myscript"], now()).with_license("CC-BY-4.0");
//!
//! // Generate plan
//! let plan = RecordPlan::new(&program, &io, &options).build_plan().unwrap();
//!
//! // Execute plan
//! let mut graph = EntityGraph::load(root).unwrap();
//! let result = PlanExecutor::new(&mut graph, root).execute(&plan).unwrap();
//! assert!(result.action_recorded);
//! ```

pub mod executor;
pub mod plan;
pub mod playback;
pub mod record;

pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction, RootUpdate};
pub use playback::{playback, playback_graph, playback_script};
pub use record::{
    now, record, record_with, record_with_strategies, RecordOptions, RecordPlan,
    MISSING_LICENSE_WARNING,
};
