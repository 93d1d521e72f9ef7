//! Recording straight from `clap` parse results.

mod common;

use clap::{Arg, ArgAction, Command};
use common::{at, count_of_type, create_temp_dir, load_graph, write_file, END, START};
use runprov::adapters::record_with_clap;
use runprov::graph::vocabulary::{property, types};
use runprov::{IoArgumentNames, RecordOptions};
use std::path::Path;

fn converter() -> Command {
    Command::new("convert")
        .about("Converts tables between formats")
        .arg(
            Arg::new("input")
                .long("input")
                .help("Table to read")
                .action(ArgAction::Append),
        )
        .arg(Arg::new("output").long("output").help("Converted table"))
        .arg(Arg::new("cache").long("cache").help("Scratch directory"))
        .arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue))
}

fn options(root: &Path, argv: &[&str]) -> RecordOptions {
    RecordOptions::new(root, argv.iter().copied(), at(START))
        .with_end_time(at(END))
        .with_current_user("alice")
        .with_software_version("3.1")
        .with_license("CC-BY-4.0")
        .with_base_dir(root)
}

#[test]
fn test_record_from_clap_matches() {
    let temp = create_temp_dir();
    let root = temp.path();
    write_file(root, "a.csv", "1,2\n");
    write_file(root, "b.csv", "3,4\n");
    write_file(root, "out.tsv", "1\t2\n3\t4\n");

    let argv = [
        "convert", "--input", "a.csv", "--input", "b.csv", "--output", "out.tsv", "--cache",
        "tmp", "--verbose",
    ];
    let command = converter();
    let matches = command.clone().get_matches_from(argv);
    let names = IoArgumentNames::new()
        .with_input_files(["input"])
        .with_output_files(["output"])
        .with_output_dirs(["cache"]);

    record_with_clap(&command, &matches, &names, &options(root, &argv)).unwrap();

    let graph = load_graph(root);
    assert_eq!(count_of_type(&graph, types::FILE), 3);

    let software = graph.get("convert@3.1").unwrap();
    assert_eq!(
        software.get_str(property::DESCRIPTION),
        Some("Converts tables between formats")
    );

    let action = graph
        .get("convert --input a.csv --input b.csv --output out.tsv --cache tmp --verbose")
        .unwrap();
    assert_eq!(action.links(property::OBJECT), vec!["a.csv", "b.csv"]);
    assert_eq!(action.links(property::RESULT), vec!["out.tsv", "tmp/"]);
    assert_eq!(
        graph.get("a.csv").unwrap().get_str(property::DESCRIPTION),
        Some("Table to read")
    );
    let cache = graph.get("tmp/").unwrap();
    assert_eq!(cache.get_str(property::NAME), Some("tmp"));
    assert_eq!(cache.get_str(property::DESCRIPTION), Some("Scratch directory"));
}

#[test]
fn test_unset_and_stdio_arguments_skipped() {
    let temp = create_temp_dir();
    let root = temp.path();
    write_file(root, "a.csv", "1,2\n");

    let argv = ["convert", "--input", "a.csv", "--output", "-"];
    let command = converter();
    let matches = command.clone().get_matches_from(argv);
    let names = IoArgumentNames::new()
        .with_input_files(["input"])
        .with_output_files(["output"])
        .with_output_dirs(["cache"]);

    record_with_clap(&command, &matches, &names, &options(root, &argv)).unwrap();

    let graph = load_graph(root);
    assert_eq!(count_of_type(&graph, types::FILE), 1);
    let action = graph.get("convert --input a.csv --output -").unwrap();
    assert!(action.links(property::RESULT).is_empty());
    assert!(action.get(property::RESULT).is_none());
}
