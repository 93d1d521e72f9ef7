//! Error types for the runprov library.
//!
//! This module provides the error hierarchy for recording and playback
//! operations, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a runprov error.
///
/// # Examples
///
/// ```
/// use runprov::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("in.txt".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the runprov library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A recorded path does not live under the crate root.
    #[error("path '{}' is outside the crate root '{}'", path.display(), root.display())]
    PathOutsideRoot {
        /// The offending path, as supplied by the caller.
        path: PathBuf,
        /// The normalized crate root.
        root: PathBuf,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The provenance document exists but does not have the expected shape.
    #[error("malformed provenance document {}: {details}", path.display())]
    MalformedDocument {
        /// Location of the document.
        path: PathBuf,
        /// What was wrong with it.
        details: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use runprov::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is a crate-root containment violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use runprov::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathOutsideRoot {
    ///     path: PathBuf::from("/etc/passwd"),
    ///     root: PathBuf::from("/work"),
    /// };
    /// assert!(err.is_outside_root());
    /// ```
    #[must_use]
    pub fn is_outside_root(&self) -> bool {
        matches!(self, Self::PathOutsideRoot { .. })
    }

    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
