//! Run lifecycle specs
//!
//! Start-up failures are fatal; a clean stdin EOF drains everything.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn store_open_failure_processes_nothing() {
    let temp = Workspace::empty();
    temp.write("blocker", "");
    let store = temp.arg("blocker/run.spool");

    let run = temp
        .spool()
        .args(&["run", "--run-id", "spec", "--sync-file", &store])
        .stdin(&[request("R"), data("A")])
        .fails()
        .stderr_has("error creating store");

    assert!(run.stdout().is_empty());
}

#[test]
fn sync_mode_creates_no_store() {
    let temp = Workspace::empty();

    let run = temp
        .run(&["--sync"], &[data("A"), request("R")])
        .stderr_has("(no store)");

    assert_eq!(run.forwarded(), vec!["A", "R"]);
    assert_eq!(nums(&run.stdout_json_lines()), vec![0, 0]);
    assert!(!temp.file("run.spool").exists());
}

#[test]
fn sync_mode_needs_no_sync_file() {
    let temp = Workspace::empty();

    let run = temp
        .spool()
        .args(&["run", "--sync"])
        .stdin(&[data("A")])
        .passes();

    assert_eq!(run.forwarded(), vec!["A"]);
}

#[test]
fn empty_input_leaves_header_only_store() {
    let temp = Workspace::empty();

    temp.run(&[], &[]);

    assert!(temp.dump("run.spool").is_empty());
    let store = temp.arg("run.spool");
    temp.spool()
        .args(&["verify", &store])
        .passes()
        .stdout_has("frames:   0");
}

#[test]
fn summary_reports_counts_on_stderr() {
    let temp = Workspace::empty();

    temp.run(
        &["--offline"],
        &[data("A"), request("B"), local("C"), always_send("D")],
    )
    .stderr_has("run spec")
    .stderr_has("received:    4")
    .stderr_has("forwarded:   2")
    .stderr_has("stored:      2");
}

#[test]
fn parent_directories_are_created() {
    let temp = Workspace::empty();
    let store = temp.arg("deep/nested/run.spool");

    temp.spool()
        .args(&["run", "--sync-file", &store])
        .stdin(&[data("A")])
        .passes();

    assert_eq!(uuids(&temp.dump("deep/nested/run.spool")), vec!["A"]);
}

#[test]
fn debug_logging_goes_to_stderr() {
    let temp = Workspace::empty();
    let store = temp.arg("run.spool");

    let run = temp
        .spool()
        .args(&["run", "--run-id", "spec", "--sync-file", &store])
        .env("SPOOL_LOG", "debug")
        .stdin(&[data("A")])
        .passes()
        .stderr_has("writer: started")
        .stderr_has("writer: closed");

    assert_eq!(run.stdout_json_lines().len(), 1);
}
