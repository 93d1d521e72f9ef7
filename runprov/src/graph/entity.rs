//! A single node of the provenance graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::vocabulary::keyword;

/// The `@type` of an entity: one type name or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityType {
    /// A single type, serialized as a string.
    Single(String),
    /// Several types, serialized as an array.
    Many(Vec<String>),
}

impl EntityType {
    /// Whether `name` is among the declared types.
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Self::Single(t) => t == name,
            Self::Many(ts) => ts.iter().any(|t| t == name),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(t) => f.write_str(t),
            Self::Many(ts) => f.write_str(&ts.join(", ")),
        }
    }
}

impl From<&str> for EntityType {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

/// Build a reference value `{"@id": id}`.
///
/// # Examples
///
/// ```
/// use runprov::graph::link;
///
/// assert_eq!(link("in.txt").to_string(), r#"{"@id":"in.txt"}"#);
/// ```
#[must_use]
pub fn link(id: &str) -> Value {
    let mut map = Map::new();
    map.insert(keyword::ID.to_string(), Value::String(id.to_string()));
    Value::Object(map)
}

fn link_target(value: &Value) -> Option<&str> {
    value.get(keyword::ID).and_then(Value::as_str)
}

/// A JSON-LD node with an identifier, a type and arbitrary properties.
///
/// Properties keep their insertion order, and properties this crate does
/// not know about survive a load/persist cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    entity_type: EntityType,
    #[serde(flatten)]
    properties: Map<String, Value>,
}

impl Entity {
    /// Create an entity with no properties.
    #[must_use]
    pub fn new(id: impl Into<String>, entity_type: impl Into<EntityType>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            properties: Map::new(),
        }
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// The same entity under another identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The `@id` of this entity.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `@type` of this entity.
    #[must_use]
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// Whether this entity declares the given type.
    #[must_use]
    pub fn is_a(&self, type_name: &str) -> bool {
        self.entity_type.includes(type_name)
    }

    /// All properties other than `@id` and `@type`.
    #[must_use]
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Look up a string property.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Set a property, replacing any previous value in place.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    /// Identifiers referenced by a property.
    ///
    /// Accepts either a single link object or an array of them; anything
    /// else yields nothing.
    #[must_use]
    pub fn links(&self, key: &str) -> Vec<String> {
        match self.properties.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(link_target)
                .map(str::to_string)
                .collect(),
            Some(value) => link_target(value)
                .map(|id| vec![id.to_string()])
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Set a property to an array of links, or remove it when `ids` is
    /// empty.
    pub fn set_links<I, S>(&mut self, key: &str, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let links: Vec<Value> = ids.into_iter().map(|id| link(id.as_ref())).collect();
        if links.is_empty() {
            self.properties.remove(key);
        } else {
            self.properties.insert(key.to_string(), Value::Array(links));
        }
    }
}
