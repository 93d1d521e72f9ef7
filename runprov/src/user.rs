//! Discovery of the user running a recorded program.

use std::env;

/// Environment variables consulted, in order.
const USER_VARIABLES: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// The login name of the current user, if one can be found.
#[must_use]
pub fn current_user() -> Option<String> {
    USER_VARIABLES
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
