//! Path relationship checking.
//!
//! Determines whether one path is an ancestor or descendant of another. The
//! crate-root containment rule is expressed in terms of these relationships.

use std::path::Path;

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use runprov::path::PathRelationship;
/// use std::path::Path;
///
/// let root = Path::new("/work");
/// let file = Path::new("/work/in.txt");
///
/// assert_eq!(
///     PathRelationship::between(root, file),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same.
    Same,

    /// Neither path is an ancestor or descendant of the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Paths are compared component-wise, so trailing separators do not
    /// matter. No filesystem access happens here.
    ///
    /// # Examples
    ///
    /// ```
    /// use runprov::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let rel = PathRelationship::between(Path::new("/a/b"), Path::new("/a"));
    /// assert_eq!(rel, PathRelationship::Descendant);
    ///
    /// // Component-wise, so a shared string prefix is not enough.
    /// let rel = PathRelationship::between(Path::new("/work"), Path::new("/workshop"));
    /// assert_eq!(rel, PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        match (path2.strip_prefix(path1), path1.strip_prefix(path2)) {
            (Ok(rest), _) if rest.as_os_str().is_empty() => Self::Same,
            (Ok(_), _) => Self::Ancestor,
            (_, Ok(_)) => Self::Descendant,
            _ => Self::Unrelated,
        }
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use runprov::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let dir = Path::new("/work");
    /// assert!(PathRelationship::is_within(Path::new("/work/out.txt"), dir));
    /// assert!(PathRelationship::is_within(dir, dir));
    /// assert!(!PathRelationship::is_within(Path::new("/tmp/x"), dir));
    /// ```
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(
            Self::between(path, directory),
            Self::Descendant | Self::Same
        )
    }

    /// Check if a path lies strictly beneath a directory.
    #[must_use]
    pub fn is_strictly_within(path: &Path, directory: &Path) -> bool {
        Self::between(path, directory) == Self::Descendant
    }
}
