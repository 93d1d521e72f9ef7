//! Integration tests for the `run` command.
//!
//! These tests wrap `sh`, so they only run on unix.

#![cfg(unix)]

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_run_records_successful_command() {
    let env = TestEnv::new();
    env.write_file("in.txt", "hello");

    env.command()
        .arg("run")
        .args(["--program", "copy", "--software-version", "0.1"])
        .args(["--license", "CC-BY-4.0"])
        .args(["--input-file", "in.txt", "--output-file", "out.txt"])
        .args(["--", "sh", "-c", "cat in.txt > out.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Recorded run"));

    let output = env.entity("out.txt").unwrap();
    assert_eq!(output["contentSize"], 5);

    let action = env.entity("sh -c 'cat in.txt > out.txt'").unwrap();
    assert_eq!(action["instrument"]["@id"], "copy@0.1");
    assert!(action["startTime"].as_str().unwrap() <= action["endTime"].as_str().unwrap());
}

#[test]
fn test_run_passes_through_stdout() {
    let env = TestEnv::new();

    env.command()
        .args(["--quiet", "run", "--software-version", "1", "--"])
        .args(["sh", "-c", "echo from-child"])
        .assert()
        .success()
        .stdout("from-child\n");

    assert_eq!(env.count_of_type("CreateAction"), 1);
}

#[test]
fn test_run_failure_propagates_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["run", "--software-version", "1", "--", "sh", "-c", "exit 3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not recorded"));

    assert!(!env.document_path().exists());
}

#[test]
fn test_run_missing_output_not_recorded() {
    let env = TestEnv::new();

    env.command()
        .args(["run", "--software-version", "1", "--output-file", "never.txt"])
        .args(["--", "sh", "-c", "true"])
        .assert()
        .code(4);

    assert!(!env.document_path().exists());
}

#[test]
fn test_run_unknown_command() {
    let env = TestEnv::new();

    env.command()
        .args(["run", "--", "definitely-not-a-real-command-runprov"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Command not found"));
}
