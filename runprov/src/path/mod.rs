//! Path handling for crate-relative identifiers.
//!
//! Every file or directory recorded in a provenance document is identified
//! by its location relative to the crate root. This module turns arbitrary
//! user-supplied paths into those identifiers.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Normalization converts paths to absolute form by:
//! - Expanding tilde (~) to the home directory
//! - Anchoring relative paths at a base directory
//! - Resolving `.` and `..` components
//!
//! ## Canonicalization
//!
//! Symlinks are followed for the longest existing prefix of a path. Outputs
//! that do not exist yet keep their non-existent tail as written.
//!
//! ## Containment
//!
//! A path may only be recorded if it lies beneath the crate root. Anything
//! else is rejected with [`Error::PathOutsideRoot`](crate::Error::PathOutsideRoot).
//!
//! # Examples
//!
//! ```
//! use runprov::path::PathRelationship;
//! use std::path::Path;
//!
//! assert!(PathRelationship::is_within(
//!     Path::new("/work/out/report.csv"),
//!     Path::new("/work"),
//! ));
//! ```

pub mod canonicalize;
pub mod normalize;
pub mod relationship;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use relationship::PathRelationship;
pub use resolver::CratePathResolver;
pub use types::{CrateRelativePath, PathKind};
