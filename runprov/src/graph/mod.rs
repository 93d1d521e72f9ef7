//! The provenance graph and its on-disk document.
//!
//! A crate root holds one `ro-crate-metadata.json` whose `@graph` is a flat
//! list of JSON-LD entities. Entities reference each other with
//! `{"@id": ...}` links. This module loads that document, lets callers
//! upsert entities by identifier, and writes it back atomically.
//!
//! # Examples
//!
//! ```
//! use runprov::graph::{builders, EntityGraph};
//!
//! let mut graph = EntityGraph::new();
//! graph.insert_if_absent(builders::person("alice"));
//! let json = graph.to_json_string().unwrap();
//! assert!(json.contains("\"alice\""));
//! ```

pub mod builders;
mod document;
mod entity;
pub mod vocabulary;

pub use builders::format_timestamp;
pub use document::{metadata_path, unique_links, EntityGraph, UpsertOutcome};
pub use entity::{link, Entity, EntityType};
pub use vocabulary::METADATA_FILENAME;
