//! Constructors for the entity shapes this crate writes.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::Value;

use super::entity::{link, Entity};
use super::vocabulary::{profile, property, types, uri, METADATA_FILENAME, ROOT_ID};

/// Render a timestamp the way the document stores it.
///
/// Fractional seconds are only written when present.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use runprov::graph::format_timestamp;
///
/// let t = DateTime::parse_from_rfc3339("2026-01-16T12:00:00+00:00").unwrap();
/// assert_eq!(format_timestamp(&t), "2026-01-16T12:00:00+00:00");
/// ```
#[must_use]
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// The root data entity, `./`.
#[must_use]
pub fn root_dataset() -> Entity {
    Entity::new(ROOT_ID, types::DATASET)
}

/// The metadata descriptor describing the document itself.
#[must_use]
pub fn metadata_descriptor() -> Entity {
    Entity::new(METADATA_FILENAME, types::CREATIVE_WORK)
        .with(property::ABOUT, link(ROOT_ID))
        .with(property::CONFORMS_TO, link(uri::RO_CRATE_SPEC))
}

/// The Process Run Crate profile entity.
#[must_use]
pub fn process_run_profile() -> Entity {
    Entity::new(uri::PROCESS_RUN_PROFILE, types::CREATIVE_WORK)
        .with(property::NAME, profile::NAME)
        .with(property::VERSION, profile::VERSION)
}

/// A `File` entity with its current size and format.
#[must_use]
pub fn file(id: &str, description: &str, content_size: u64, encoding_format: &str) -> Entity {
    Entity::new(id, types::FILE)
        .with(property::NAME, id)
        .with(property::DESCRIPTION, description)
        .with(property::CONTENT_SIZE, content_size)
        .with(property::ENCODING_FORMAT, encoding_format)
}

/// A `Dataset` entity for a directory. An empty description is left out.
#[must_use]
pub fn directory(id: &str, name: &str, description: &str) -> Entity {
    let mut entity = Entity::new(id, types::DATASET).with(property::NAME, name);
    if !description.is_empty() {
        entity.set(property::DESCRIPTION, description);
    }
    entity
}

/// A `SoftwareApplication` entity. Empty description or version are left
/// out.
#[must_use]
pub fn software(id: &str, name: &str, description: &str, version: &str) -> Entity {
    let mut entity = Entity::new(id, types::SOFTWARE_APPLICATION).with(property::NAME, name);
    if !description.is_empty() {
        entity.set(property::DESCRIPTION, description);
    }
    if !version.is_empty() {
        entity.set(property::VERSION, version);
    }
    entity
}

/// A `Person` entity named after its identifier.
#[must_use]
pub fn person(id: &str) -> Entity {
    Entity::new(id, types::PERSON).with(property::NAME, id)
}

/// Fields of a recorded invocation.
#[derive(Debug, Clone)]
pub struct ActionFields<'a> {
    /// Action identifier, also used as its name.
    pub id: &'a str,
    /// When the invocation started.
    pub start_time: &'a DateTime<FixedOffset>,
    /// When the invocation ended.
    pub end_time: &'a DateTime<FixedOffset>,
    /// Identifier of the person who ran it.
    pub agent: &'a str,
    /// Identifier of the software that was run.
    pub instrument: &'a str,
    /// Inputs, in argument order, already de-duplicated.
    pub objects: &'a [String],
    /// Outputs, in argument order, already de-duplicated.
    pub results: &'a [String],
}

/// A `CreateAction` entity. Empty object or result lists are left out.
#[must_use]
pub fn create_action(fields: &ActionFields<'_>) -> Entity {
    let mut entity = Entity::new(fields.id, types::CREATE_ACTION)
        .with(property::NAME, fields.id)
        .with(
            property::START_TIME,
            Value::String(format_timestamp(fields.start_time)),
        )
        .with(
            property::END_TIME,
            Value::String(format_timestamp(fields.end_time)),
        )
        .with(property::AGENT, link(fields.agent))
        .with(property::INSTRUMENT, link(fields.instrument));
    entity.set_links(property::OBJECT, fields.objects);
    entity.set_links(property::RESULT, fields.results);
    entity
}
