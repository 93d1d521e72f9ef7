//! Lexical normalization of user-supplied paths.
//!
//! Nothing here touches the filesystem: `~` is expanded, relative paths are
//! anchored at a base directory and `.`/`..` are folded away. Symlinks are
//! handled separately in [`canonicalize`](super::canonicalize).

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

fn invalid(path: &Path, reason: impl Into<String>) -> Error {
    Error::InvalidPath {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Expand a leading `~` to the home directory.
///
/// Only `~` and `~/rest` are understood; `~user` is rejected.
///
/// # Errors
///
/// Returns `InvalidPath` for `~user` paths or when there is no home
/// directory.
///
/// # Examples
///
/// ```
/// use runprov::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    let first = match components.next() {
        Some(Component::Normal(first)) => first,
        _ => return Ok(path.to_path_buf()),
    };
    if first != "~" {
        if first.to_string_lossy().starts_with('~') {
            return Err(invalid(path, "~user paths are not supported; use ~ or ~/path"));
        }
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| invalid(path, "No home directory"))?;
    let rest = components.as_path();
    Ok(if rest.as_os_str().is_empty() {
        home
    } else {
        home.join(rest)
    })
}

/// Fold `.` and `..` components of an absolute path.
///
/// # Errors
///
/// Returns `InvalidPath` if `..` would climb above the filesystem root.
///
/// # Examples
///
/// ```
/// use runprov::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut anchor: Vec<Component<'_>> = Vec::new();
    let mut names: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                if names.pop().is_none() {
                    return Err(invalid(path, "Too many '..' components"));
                }
            }
            Component::Normal(_) => names.push(component),
        }
    }

    Ok(anchor.into_iter().chain(names).collect())
}

/// Normalize a path to absolute form, anchoring relative paths at `base`.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or the path escapes the
/// filesystem root.
///
/// # Examples
///
/// ```
/// use runprov::path::normalize::normalize_from;
/// use std::path::Path;
///
/// let normalized = normalize_from(Path::new("data/../in.txt"), Path::new("/work")).unwrap();
/// assert_eq!(normalized, Path::new("/work/in.txt"));
/// ```
pub fn normalize_from(path: &Path, base: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    resolve_components(&absolute)
}

/// Normalize a path to absolute form.
///
/// Relative paths are anchored at the current working directory.
///
/// # Errors
///
/// Returns an error if:
/// - Tilde expansion fails
/// - Current directory cannot be determined
/// - Path contains too many `..` components
///
/// # Examples
///
/// ```no_run
/// use runprov::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./src")).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir()
        .map_err(|e| invalid(path, format!("No current directory: {e}")))?;
    normalize_from(path, &cwd)
}
