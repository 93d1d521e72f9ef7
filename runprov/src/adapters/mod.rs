//! Argument parser adapters.
//!
//! Each adapter implements [`ArgumentSource`](crate::ArgumentSource) for one
//! parsing library so a recording can be made straight from parsed
//! arguments.

pub mod clap;

pub use self::clap::{record_with_clap, ClapArguments};
