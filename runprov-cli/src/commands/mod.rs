//! CLI command implementations.
//!
//! - `record`: Record a run that already happened
//! - `run`: Run a command and record it
//! - `playback`: Print recorded command lines in completion order
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod playback;
pub mod record;
pub mod run;

pub use completions::CompletionsCommand;
pub use playback::PlaybackCommand;
pub use record::{RecordCommand, RecordFlags};
pub use run::RunCommand;
