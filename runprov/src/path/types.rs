//! Core types for crate-relative path handling.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::identity;

/// Whether a recorded path names a file or a directory.
///
/// The two kinds live in one identifier namespace; directories carry a
/// trailing `/` so `data` (file) and `data/` (directory) never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// A path expressed relative to the crate root.
///
/// # Examples
///
/// ```
/// use runprov::path::{CrateRelativePath, PathKind};
/// use std::path::PathBuf;
///
/// let rel = CrateRelativePath::new("data/raw", PathBuf::from("/work/data/raw"), PathKind::Directory);
/// assert_eq!(rel.id(), "data/raw/");
/// assert_eq!(rel.relative(), "data/raw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrateRelativePath {
    relative: String,
    absolute: PathBuf,
    kind: PathKind,
}

impl CrateRelativePath {
    /// Create a crate-relative path.
    ///
    /// `relative` uses `/` separators and has no trailing separator; an empty
    /// string denotes the crate root itself.
    #[must_use]
    pub fn new(relative: impl Into<String>, absolute: PathBuf, kind: PathKind) -> Self {
        Self {
            relative: relative.into(),
            absolute,
            kind,
        }
    }

    /// The relative path without any trailing separator.
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// The graph identifier for this path.
    ///
    /// Files use the relative path as is; directories append `/`, and the
    /// crate root itself is `./`.
    #[must_use]
    pub fn id(&self) -> String {
        match self.kind {
            PathKind::File => identity::file_id(&self.relative),
            PathKind::Directory => identity::directory_id(&self.relative),
        }
    }

    /// The normalized absolute location on disk.
    #[must_use]
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Whether this is a file or directory.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.kind
    }
}

impl fmt::Display for CrateRelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
