//! Path canonicalization functions.
//!
//! Recorded paths may name outputs that do not exist yet, so canonicalization
//! here follows symlinks for the longest existing prefix of a path and keeps
//! the non-existent tail as written.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Canonicalize a path by following symlinks.
///
/// The path must exist for canonicalization to succeed.
///
/// # Errors
///
/// Returns `PathNotFound`, `PermissionDenied`, or an I/O error.
///
/// # Examples
///
/// ```no_run
/// use runprov::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })
}

/// Canonicalize the existing portion of a path.
///
/// For non-existent paths, finds the longest existing ancestor,
/// canonicalizes it, and reports the remaining components separately.
///
/// # Errors
///
/// Returns an error if no existing ancestor can be found or canonicalization
/// of the existing portion fails.
///
/// # Examples
///
/// ```no_run
/// use runprov::path::canonicalize::canonicalize_existing;
/// use std::path::Path;
///
/// let (canonical, remainder) =
///     canonicalize_existing(Path::new("/tmp/nonexistent/file")).unwrap();
/// // canonical is the canonicalized /tmp
/// // remainder is Some("nonexistent/file")
/// ```
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
        if !ancestor.exists() {
            continue;
        }
        let canonical = canonicalize(ancestor)?;
        let remainder = path
            .strip_prefix(ancestor)
            .ok()
            .filter(|rest| !rest.as_os_str().is_empty())
            .map(Path::to_path_buf);
        return Ok((canonical, remainder));
    }

    Err(Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "No part of the path exists".to_string(),
    })
}

/// Follow symlinks along an absolute path, tolerating a missing tail.
///
/// # Errors
///
/// Returns an error if the existing portion cannot be canonicalized.
pub fn resolve_symlinks(path: &Path) -> Result<PathBuf> {
    let (canonical, remainder) = canonicalize_existing(path)?;
    Ok(match remainder {
        Some(rest) => canonical.join(rest),
        None => canonical,
    })
}
