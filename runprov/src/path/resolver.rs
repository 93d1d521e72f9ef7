//! Crate-root path resolution.
//!
//! This module provides [`CratePathResolver`], which turns user-supplied
//! paths into identifiers relative to a crate root and enforces that every
//! recorded path lives beneath that root.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::relationship::PathRelationship;
use crate::path::types::{CrateRelativePath, PathKind};
use crate::path::{canonicalize, normalize};

/// Resolves paths against a crate root.
///
/// Both the root and every resolved path are normalized (tilde expansion,
/// absolute form, `.`/`..` removal) and then have symlinks followed for
/// their existing prefix, so a path reached through a symlinked directory
/// maps to the same identifier as its real location.
///
/// # Examples
///
/// ```no_run
/// use runprov::path::CratePathResolver;
/// use std::path::Path;
///
/// let resolver = CratePathResolver::new(Path::new("/work")).unwrap();
/// let rel = resolver.resolve_file(Path::new("/work/data/in.txt")).unwrap();
/// assert_eq!(rel.id(), "data/in.txt");
///
/// assert!(resolver.resolve_file(Path::new("/etc/passwd")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CratePathResolver {
    root: PathBuf,
    base_dir: PathBuf,
}

impl CratePathResolver {
    /// Create a resolver for the given crate root.
    ///
    /// Relative paths passed to the resolver are anchored at the current
    /// working directory unless [`with_base_dir`](Self::with_base_dir) says
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be normalized or the working
    /// directory cannot be determined.
    pub fn new(crate_root: &Path) -> Result<Self> {
        let base_dir = env::current_dir()?;
        let root = Self::normalize_root(crate_root, &base_dir)?;
        Ok(Self { root, base_dir })
    }

    /// Anchor relative paths (and a relative crate root) at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be re-normalized against the new
    /// base.
    pub fn with_base_dir(crate_root: &Path, base_dir: &Path) -> Result<Self> {
        let base_dir = normalize::normalize(base_dir)?;
        let root = Self::normalize_root(crate_root, &base_dir)?;
        Ok(Self { root, base_dir })
    }

    fn normalize_root(crate_root: &Path, base_dir: &Path) -> Result<PathBuf> {
        let normalized = normalize::normalize_from(crate_root, base_dir)?;
        canonicalize::resolve_symlinks(&normalized)
    }

    /// The normalized crate root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory relative paths are anchored at.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path naming a file.
    ///
    /// # Errors
    ///
    /// Returns `PathOutsideRoot` if the path is not strictly beneath the
    /// crate root (the root itself cannot be recorded as a file).
    pub fn resolve_file(&self, path: &Path) -> Result<CrateRelativePath> {
        let absolute = self.absolute(path)?;
        if !PathRelationship::is_strictly_within(&absolute, &self.root) {
            return Err(self.outside(path));
        }
        let relative = self.relative_string(path, &absolute)?;
        Ok(CrateRelativePath::new(relative, absolute, PathKind::File))
    }

    /// Resolve a path naming a directory.
    ///
    /// The crate root itself is accepted and maps to `./`.
    ///
    /// # Errors
    ///
    /// Returns `PathOutsideRoot` if the path is not within the crate root.
    pub fn resolve_directory(&self, path: &Path) -> Result<CrateRelativePath> {
        let absolute = self.absolute(path)?;
        if !PathRelationship::is_within(&absolute, &self.root) {
            return Err(self.outside(path));
        }
        let relative = self.relative_string(path, &absolute)?;
        Ok(CrateRelativePath::new(
            relative,
            absolute,
            PathKind::Directory,
        ))
    }

    /// Resolve a path of the given kind.
    ///
    /// # Errors
    ///
    /// See [`resolve_file`](Self::resolve_file) and
    /// [`resolve_directory`](Self::resolve_directory).
    pub fn resolve(&self, path: &Path, kind: PathKind) -> Result<CrateRelativePath> {
        match kind {
            PathKind::File => self.resolve_file(path),
            PathKind::Directory => self.resolve_directory(path),
        }
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        let normalized = normalize::normalize_from(path, &self.base_dir)?;
        canonicalize::resolve_symlinks(&normalized)
    }

    fn outside(&self, path: &Path) -> Error {
        Error::PathOutsideRoot {
            path: path.to_path_buf(),
            root: self.root.clone(),
        }
    }

    fn relative_string(&self, original: &Path, absolute: &Path) -> Result<String> {
        let stripped = absolute
            .strip_prefix(&self.root)
            .map_err(|_| self.outside(original))?;

        let mut parts = Vec::new();
        for component in stripped.components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| Error::InvalidPath {
                        path: original.to_path_buf(),
                        reason: "Path contains invalid UTF-8".to_string(),
                    })?;
                    parts.push(part);
                }
                Component::CurDir => {}
                _ => {
                    return Err(Error::InvalidPath {
                        path: original.to_path_buf(),
                        reason: "Unexpected component after normalization".to_string(),
                    });
                }
            }
        }
        Ok(parts.join("/"))
    }
}
