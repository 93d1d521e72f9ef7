//! Integration tests for documents edited outside of recording.
//!
//! Recording must keep whatever it does not understand and must not
//! replace a hand-written context.

mod common;

use common::{create_temp_dir, read_document, write_file, RecordFixture};
use runprov::graph::metadata_path;
use runprov::graph::vocabulary::uri;
use serde_json::json;
use std::fs;

#[test]
fn test_unknown_entities_survive_recording() {
    let temp = create_temp_dir();
    let root = temp.path();
    let document = json!({
        "@context": uri::RO_CRATE_CONTEXT,
        "@graph": [
            {"@id": "./", "@type": "Dataset", "funder": {"@id": "#grant"}},
            {"@id": "ro-crate-metadata.json", "@type": "CreativeWork", "about": {"@id": "./"}},
            {"@id": "#grant", "@type": "Grant", "identifier": "G-42"},
            {"@id": "https://orcid.org/0000-0002-1825-0097", "@type": ["Person", "Researcher"], "name": "Josiah Carberry"}
        ]
    });
    fs::write(metadata_path(root), document.to_string()).unwrap();

    RecordFixture::new(root).record().unwrap();

    let value = read_document(root);
    let graph = value["@graph"].as_array().unwrap();
    let grant = graph.iter().find(|e| e["@id"] == "#grant").unwrap();
    assert_eq!(grant["@type"], "Grant");
    assert_eq!(grant["identifier"], "G-42");

    let orcid = graph
        .iter()
        .find(|e| e["@id"] == "https://orcid.org/0000-0002-1825-0097")
        .unwrap();
    assert_eq!(orcid["@type"], json!(["Person", "Researcher"]));

    let dataset = graph.iter().find(|e| e["@id"] == "./").unwrap();
    assert_eq!(dataset["funder"], json!({"@id": "#grant"}));
}

#[test]
fn test_existing_context_extended_once() {
    let temp = create_temp_dir();
    let root = temp.path();

    RecordFixture::new(root)
        .with_argv(&["myscript", "a"])
        .record()
        .unwrap();
    RecordFixture::new(root)
        .with_argv(&["myscript", "b"])
        .record()
        .unwrap();

    assert_eq!(
        read_document(root)["@context"],
        json!([uri::RO_CRATE_CONTEXT, uri::WORKFLOW_RUN_CONTEXT])
    );
}

#[test]
fn test_context_object_kept() {
    let temp = create_temp_dir();
    let root = temp.path();
    let document = json!({
        "@context": [uri::RO_CRATE_CONTEXT, {"local": "https://example.org/local#"}],
        "@graph": []
    });
    fs::write(metadata_path(root), document.to_string()).unwrap();

    RecordFixture::new(root).record().unwrap();

    assert_eq!(
        read_document(root)["@context"],
        json!([
            uri::RO_CRATE_CONTEXT,
            {"local": "https://example.org/local#"},
            uri::WORKFLOW_RUN_CONTEXT
        ])
    );
}

#[test]
fn test_malformed_document_not_overwritten() {
    let temp = create_temp_dir();
    let root = temp.path();
    write_file(root, "in.txt", "x");
    fs::write(metadata_path(root), r#"{"@context": "x"}"#).unwrap();

    let err = RecordFixture::new(root)
        .with_input_file("input", "in.txt")
        .record()
        .unwrap_err();

    assert!(matches!(err, runprov::Error::MalformedDocument { .. }));
    assert_eq!(
        fs::read_to_string(metadata_path(root)).unwrap(),
        r#"{"@context": "x"}"#
    );
}

#[test]
fn test_document_ends_with_newline_and_is_indented() {
    let temp = create_temp_dir();
    let root = temp.path();

    RecordFixture::new(root).record().unwrap();

    let text = fs::read_to_string(metadata_path(root)).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"@graph\""));
}
