//! Reconstructing the execution history of a crate.

use std::path::Path;

use crate::error::Result;
use crate::graph::vocabulary::{property, types};
use crate::graph::{metadata_path, EntityGraph};

/// Recorded command lines of `graph` ordered by completion time.
///
/// Only `CreateAction` entities with a non-empty `endTime` are included.
/// The command line is the action's `name`, or its identifier when it has
/// no name. Times are compared as strings, which orders them
/// chronologically as long as they share one offset; ties keep document
/// order.
#[must_use]
pub fn playback_graph(graph: &EntityGraph) -> Vec<String> {
    let mut actions: Vec<(&str, &str)> = graph
        .entities_of_type(types::CREATE_ACTION)
        .filter_map(|action| {
            let end = action.get_str(property::END_TIME)?;
            let command = action
                .get_str(property::NAME)
                .filter(|name| !name.is_empty())
                .unwrap_or(action.id());
            (!end.is_empty() && !command.is_empty()).then_some((end, command))
        })
        .collect();
    actions.sort_by_key(|&(end, _)| end);
    actions.into_iter().map(|(_, command)| command.to_string()).collect()
}

/// Recorded command lines under `crate_root`, oldest first.
///
/// Returns an empty list when no document exists.
///
/// # Errors
///
/// Returns an error if the document exists but cannot be read or parsed.
///
/// # Examples
///
/// ```
/// use runprov::playback;
///
/// let empty = tempfile::tempdir().unwrap();
/// assert!(playback(empty.path()).unwrap().is_empty());
/// ```
pub fn playback(crate_root: &Path) -> Result<Vec<String>> {
    if !metadata_path(crate_root).exists() {
        return Ok(Vec::new());
    }
    let graph = EntityGraph::load(crate_root)?;
    Ok(playback_graph(&graph))
}

/// Recorded command lines joined by newlines, suitable for re-running as a
/// shell script. Empty when nothing was recorded.
///
/// # Errors
///
/// See [`playback`].
pub fn playback_script(crate_root: &Path) -> Result<String> {
    Ok(playback(crate_root)?.join("\n"))
}
