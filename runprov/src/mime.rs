//! MIME type guessing for recorded files.

use std::path::Path;

/// Format recorded when the extension is unknown.
pub const DEFAULT_ENCODING_FORMAT: &str = "application/octet-stream";

/// Guess a file's encoding format from its name.
///
/// # Examples
///
/// ```
/// use runprov::mime::guess_encoding_format;
/// use std::path::Path;
///
/// assert_eq!(guess_encoding_format(Path::new("in.txt")), "text/plain");
/// assert_eq!(guess_encoding_format(Path::new("blob")), "application/octet-stream");
/// ```
#[must_use]
pub fn guess_encoding_format(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_ENCODING_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_formats() {
        assert_eq!(guess_encoding_format(Path::new("data/table.csv")), "text/csv");
        assert_eq!(guess_encoding_format(Path::new("x.json")), "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(
            guess_encoding_format(Path::new("out.runprov-unknown")),
            DEFAULT_ENCODING_FORMAT
        );
    }
}
