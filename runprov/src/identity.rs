//! Identifier derivation for graph entities.
//!
//! All functions here are pure. Identifier collision rules differ by entity
//! kind, and those rules live in one place so that recording and playback
//! agree on them.

/// Characters that never need quoting in a POSIX shell word.
fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quote a single token so a POSIX shell reads it back verbatim.
///
/// # Examples
///
/// ```
/// use runprov::identity::shell_quote;
///
/// assert_eq!(shell_quote("--input"), "--input");
/// assert_eq!(shell_quote(""), "''");
/// assert_eq!(shell_quote("two words"), "'two words'");
/// assert_eq!(shell_quote("it's"), r#"'it'"'"'s'"#);
/// ```
#[must_use]
pub fn shell_quote(token: &str) -> String {
    if token.is_empty() {
        return "''".to_string();
    }
    if token.chars().all(is_shell_safe) {
        return token.to_string();
    }
    format!("'{}'", token.replace('\'', r#"'"'"'"#))
}

/// Derive the action identifier from the invocation tokens.
///
/// The identifier is the program name followed by every argument exactly as
/// supplied, each shell-quoted and joined by single spaces. Two invocations
/// collapse to the same action only when their command lines match token
/// for token.
///
/// # Examples
///
/// ```
/// use runprov::identity::action_id;
///
/// let id = action_id(["myscript", "--input", "in file.txt"]);
/// assert_eq!(id, "myscript --input 'in file.txt'");
/// ```
pub fn action_id<I, S>(argv: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    argv.into_iter()
        .map(|token| shell_quote(token.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the software identifier from a program name and version.
///
/// # Examples
///
/// ```
/// use runprov::identity::software_id;
///
/// assert_eq!(software_id("myscript", "1.0.0"), "myscript@1.0.0");
/// assert_eq!(software_id("myscript", ""), "myscript");
/// ```
#[must_use]
pub fn software_id(name: &str, version: &str) -> String {
    if version.is_empty() {
        name.to_string()
    } else {
        format!("{name}@{version}")
    }
}

/// Derive the agent identifier from a username (used verbatim).
#[must_use]
pub fn agent_id(username: &str) -> String {
    username.to_string()
}

/// Derive a file identifier from its crate-relative path.
#[must_use]
pub fn file_id(relative: &str) -> String {
    relative.to_string()
}

/// Derive a directory identifier from its crate-relative path.
///
/// # Examples
///
/// ```
/// use runprov::identity::directory_id;
///
/// assert_eq!(directory_id("results"), "results/");
/// assert_eq!(directory_id(""), "./");
/// ```
#[must_use]
pub fn directory_id(relative: &str) -> String {
    if relative.is_empty() {
        "./".to_string()
    } else {
        format!("{relative}/")
    }
}
