//! The persisted provenance document.
//!
//! [`EntityGraph`] holds the `@context` and the ordered `@graph` of a crate
//! root's `ro-crate-metadata.json`. Entities are keyed by identifier;
//! document order is kept so unchanged entities persist where they were.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use super::builders;
use super::entity::Entity;
use super::vocabulary::{keyword, uri, METADATA_FILENAME, ROOT_ID};
use crate::error::{Error, Result};

/// Whether an upsert created a new entity or merged into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entity with that identifier existed.
    Inserted,
    /// The existing entity was passed to the merge function.
    Merged,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    #[serde(rename = "@context")]
    context: &'a Value,
    #[serde(rename = "@graph")]
    graph: &'a [Entity],
}

/// Location of the provenance document under a crate root.
#[must_use]
pub fn metadata_path(crate_root: &Path) -> PathBuf {
    crate_root.join(METADATA_FILENAME)
}

/// De-duplicate identifiers, keeping the first occurrence of each.
///
/// # Examples
///
/// ```
/// use runprov::graph::unique_links;
///
/// let ids = unique_links(["a.txt", "b.txt", "a.txt"]);
/// assert_eq!(ids, vec!["a.txt", "b.txt"]);
/// ```
pub fn unique_links<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        let id = id.as_ref();
        if seen.insert(id.to_string()) {
            out.push(id.to_string());
        }
    }
    out
}

/// An in-memory provenance graph.
///
/// # Examples
///
/// ```
/// use runprov::graph::{EntityGraph, Entity};
///
/// let mut graph = EntityGraph::new();
/// assert!(graph.contains("./"));
/// assert!(graph.insert_if_absent(Entity::new("alice", "Person")));
/// assert!(!graph.insert_if_absent(Entity::new("alice", "Person")));
/// ```
#[derive(Debug, Clone)]
pub struct EntityGraph {
    context: Value,
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Default for EntityGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityGraph {
    /// A fresh graph containing only the root dataset and the metadata
    /// descriptor.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = Self {
            context: Value::String(uri::RO_CRATE_CONTEXT.to_string()),
            entities: Vec::new(),
            index: HashMap::new(),
        };
        graph.ensure_structural_entities();
        graph
    }

    /// Load the document under `crate_root`, or start a fresh graph when
    /// none exists.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the file exists but is not a valid
    /// document, or an I/O error if it cannot be read.
    pub fn load(crate_root: &Path) -> Result<Self> {
        let path = metadata_path(crate_root);
        if !path.exists() {
            log::debug!("No provenance document at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let text = fs::read_to_string(&path)?;
        Self::parse(&text, &path)
    }

    /// Parse a document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the text is not a JSON object with a
    /// `@graph` array of entities.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new(METADATA_FILENAME))
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let malformed = |details: String| Error::MalformedDocument {
            path: path.to_path_buf(),
            details,
        };

        let value: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
        let Value::Object(mut document) = value else {
            return Err(malformed("top level is not an object".to_string()));
        };

        let context = document
            .remove(keyword::CONTEXT)
            .unwrap_or_else(|| Value::String(uri::RO_CRATE_CONTEXT.to_string()));
        let Some(Value::Array(items)) = document.remove(keyword::GRAPH) else {
            return Err(malformed("missing @graph array".to_string()));
        };

        let mut graph = Self {
            context,
            entities: Vec::with_capacity(items.len()),
            index: HashMap::new(),
        };
        for (position, item) in items.into_iter().enumerate() {
            let entity: Entity = serde_json::from_value(item)
                .map_err(|e| malformed(format!("entity {position}: {e}")))?;
            if graph.contains(entity.id()) {
                log::warn!("Duplicate entity '{}' in document, keeping the last", entity.id());
                graph.replace(entity);
            } else {
                graph.push(entity);
            }
        }
        graph.ensure_structural_entities();
        Ok(graph)
    }

    fn ensure_structural_entities(&mut self) {
        self.insert_if_absent(builders::root_dataset());
        self.insert_if_absent(builders::metadata_descriptor());
    }

    fn push(&mut self, entity: Entity) {
        self.index.insert(entity.id().to_string(), self.entities.len());
        self.entities.push(entity);
    }

    /// The `@context` value.
    #[must_use]
    pub fn context(&self) -> &Value {
        &self.context
    }

    /// Add a context URI unless already present.
    ///
    /// A single-string context becomes an array.
    pub fn extend_context(&mut self, context_uri: &str) {
        let extra = Value::String(context_uri.to_string());
        match &mut self.context {
            Value::Array(items) => {
                if !items.contains(&extra) {
                    items.push(extra);
                }
            }
            current if *current == extra => {}
            current => {
                let previous = current.take();
                *current = Value::Array(vec![previous, extra]);
            }
        }
    }

    /// Look up an entity.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    /// Look up an entity for modification.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        let i = *self.index.get(id)?;
        self.entities.get_mut(i)
    }

    /// Whether an entity with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of entities, including the root and descriptor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the graph has no entities. Never true for a loaded graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in document order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities declaring the given type, in document order.
    pub fn entities_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.entities.iter().filter(move |e| e.is_a(type_name))
    }

    /// The root dataset.
    pub fn root_mut(&mut self) -> &mut Entity {
        if !self.contains(ROOT_ID) {
            self.push(builders::root_dataset());
        }
        let i = self.index[ROOT_ID];
        &mut self.entities[i]
    }

    /// Insert `entity`, or hand it to `merge` together with the existing
    /// entity of the same identifier.
    pub fn upsert<F>(&mut self, entity: Entity, merge: F) -> UpsertOutcome
    where
        F: FnOnce(&mut Entity, Entity),
    {
        match self.get_mut(entity.id()) {
            Some(existing) => {
                merge(existing, entity);
                UpsertOutcome::Merged
            }
            None => {
                self.push(entity);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Insert `entity` unless its identifier is taken. Returns whether it
    /// was inserted.
    pub fn insert_if_absent(&mut self, entity: Entity) -> bool {
        if self.contains(entity.id()) {
            return false;
        }
        self.push(entity);
        true
    }

    /// Insert `entity`, overwriting an existing one at its position.
    pub fn replace(&mut self, entity: Entity) {
        match self.index.get(entity.id()) {
            Some(&i) => self.entities[i] = entity,
            None => self.push(entity),
        }
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&DocumentRef {
            context: &self.context,
            graph: &self.entities,
        })?;
        text.push('\n');
        Ok(text)
    }

    /// Write the document under `crate_root`, creating the directory if
    /// needed.
    ///
    /// The file is written to a temporary sibling and renamed into place,
    /// so readers see either the old or the new document. The new file takes
    /// the permissions of the document it replaces.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn persist(&self, crate_root: &Path) -> Result<PathBuf> {
        fs::create_dir_all(crate_root)?;
        let path = metadata_path(crate_root);
        let text = self.to_json_string()?;

        let mut tmp = NamedTempFile::new_in(crate_root)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        if let Some(permissions) = document_permissions(&path) {
            tmp.as_file().set_permissions(permissions)?;
        }
        tmp.persist(&path).map_err(|e| Error::Io(e.error))?;

        log::debug!("Wrote {} entities to {}", self.len(), path.display());
        Ok(path)
    }
}

fn document_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
