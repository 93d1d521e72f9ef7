//! RO-Crate vocabulary constants.
//!
//! Terms used in the persisted document, following RO-Crate 1.1 and the
//! Process Run Crate profile.

/// Name of the provenance document inside the crate root.
pub const METADATA_FILENAME: &str = "ro-crate-metadata.json";

/// Identifier of the root data entity.
pub const ROOT_ID: &str = "./";

/// JSON-LD keywords.
pub mod keyword {
    /// `@context`
    pub const CONTEXT: &str = "@context";
    /// `@graph`
    pub const GRAPH: &str = "@graph";
    /// `@id`
    pub const ID: &str = "@id";
    /// `@type`
    pub const TYPE: &str = "@type";
}

/// Context and profile URIs.
pub mod uri {
    /// Base JSON-LD context of RO-Crate 1.1.
    pub const RO_CRATE_CONTEXT: &str = "https://w3id.org/ro/crate/1.1/context";
    /// Target of the descriptor's `conformsTo`.
    pub const RO_CRATE_SPEC: &str = "https://w3id.org/ro/crate/1.1";
    /// Extra context required by the workflow-run profiles.
    pub const WORKFLOW_RUN_CONTEXT: &str = "https://w3id.org/ro/terms/workflow-run/context";
    /// Identifier of the Process Run Crate profile entity.
    pub const PROCESS_RUN_PROFILE: &str = "https://w3id.org/ro/wfrun/process/0.5";
}

/// Entity types.
pub mod types {
    /// `File`
    pub const FILE: &str = "File";
    /// `Dataset`
    pub const DATASET: &str = "Dataset";
    /// `SoftwareApplication`
    pub const SOFTWARE_APPLICATION: &str = "SoftwareApplication";
    /// `Person`
    pub const PERSON: &str = "Person";
    /// `CreateAction`
    pub const CREATE_ACTION: &str = "CreateAction";
    /// `CreativeWork`
    pub const CREATIVE_WORK: &str = "CreativeWork";
}

/// Entity properties.
pub mod property {
    /// `name`
    pub const NAME: &str = "name";
    /// `description`
    pub const DESCRIPTION: &str = "description";
    /// `version`
    pub const VERSION: &str = "version";
    /// `contentSize`
    pub const CONTENT_SIZE: &str = "contentSize";
    /// `encodingFormat`
    pub const ENCODING_FORMAT: &str = "encodingFormat";
    /// `startTime`
    pub const START_TIME: &str = "startTime";
    /// `endTime`
    pub const END_TIME: &str = "endTime";
    /// `agent`
    pub const AGENT: &str = "agent";
    /// `instrument`
    pub const INSTRUMENT: &str = "instrument";
    /// `object`
    pub const OBJECT: &str = "object";
    /// `result`
    pub const RESULT: &str = "result";
    /// `hasPart`
    pub const HAS_PART: &str = "hasPart";
    /// `datePublished`
    pub const DATE_PUBLISHED: &str = "datePublished";
    /// `license`
    pub const LICENSE: &str = "license";
    /// `conformsTo`
    pub const CONFORMS_TO: &str = "conformsTo";
    /// `about`
    pub const ABOUT: &str = "about";
}

/// Fixed values of the Process Run Crate profile entity.
pub mod profile {
    /// `Process Run Crate`
    pub const NAME: &str = "Process Run Crate";
    /// `0.5`
    pub const VERSION: &str = "0.5";
}
