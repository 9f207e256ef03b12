//! Routing specs for `spool run`
//!
//! Forwarded records appear on stdout; persisted ones in the store file.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn data_records_are_forwarded_and_stored() {
    let temp = Workspace::empty();

    let run = temp.run(&[], &[data("A"), data("B")]);

    assert_eq!(run.forwarded(), vec!["A", "B"]);
    assert_eq!(uuids(&temp.dump("run.spool")), vec!["A", "B"]);
}

#[test]
fn local_records_are_forwarded_but_not_stored() {
    let temp = Workspace::empty();

    let run = temp.run(&[], &[data("A"), local("B"), data("C")]);

    assert_eq!(run.forwarded(), vec!["A", "B", "C"]);
    assert_eq!(uuids(&temp.dump("run.spool")), vec!["A", "C"]);
}

#[test]
fn requests_are_forwarded_but_not_stored_even_offline() {
    let temp = Workspace::empty();

    let run = temp.run(&["--offline"], &[request("R1"), data("A"), request("R2")]);

    assert_eq!(run.forwarded(), vec!["R1", "R2"]);
    assert_eq!(uuids(&temp.dump("run.spool")), vec!["A"]);
}

#[test]
fn offline_forwards_only_always_send() {
    let temp = Workspace::empty();

    let run = temp.run(&["--offline"], &[data("A"), always_send("B")]);

    assert_eq!(run.forwarded(), vec!["B"]);
    assert_eq!(uuids(&temp.dump("run.spool")), vec!["A", "B"]);
}

#[test]
fn offline_run_routes_each_record_independently() {
    let temp = Workspace::empty();

    let run = temp.run(
        &["--offline"],
        &[data("A"), request("B"), local("C"), always_send("D")],
    );

    assert_eq!(run.forwarded(), vec!["B", "D"]);
    let stored = temp.dump("run.spool");
    assert_eq!(uuids(&stored), vec!["A", "D"]);
    assert_eq!(nums(&stored), vec![1, 2]);
}

#[test]
fn offline_can_come_from_the_environment() {
    let temp = Workspace::empty();
    let store = temp.arg("run.spool");

    let run = temp
        .spool()
        .args(&["run", "--sync-file", &store])
        .env("SPOOL_OFFLINE", "1")
        .stdin(&[data("A"), always_send("B")])
        .passes();

    assert_eq!(run.forwarded(), vec!["B"]);
}

#[test]
fn settings_file_configures_the_run() {
    let temp = Workspace::empty();
    let store = temp.arg("logs/from-settings.spool");
    temp.write(
        "spool.toml",
        &format!("run_id = \"cfg\"\nsync_file = {:?}\nx_offline = true\n", store),
    );
    let settings = temp.arg("spool.toml");

    let run = temp
        .spool()
        .args(&["run", "--settings", &settings])
        .stdin(&[data("A"), request("R")])
        .passes()
        .stderr_has("run cfg");

    assert_eq!(run.forwarded(), vec!["R"]);
    assert_eq!(uuids(&temp.dump("logs/from-settings.spool")), vec!["A"]);
}

#[test]
fn malformed_records_are_dropped() {
    let temp = Workspace::empty();

    let run = temp
        .run(&[], &[unset("U"), data("A")])
        .stderr_has("dropped:     1");

    assert_eq!(run.forwarded(), vec!["A"]);
    assert_eq!(uuids(&temp.dump("run.spool")), vec!["A"]);
}

#[test]
fn unparseable_lines_are_skipped() {
    let temp = Workspace::empty();
    let store = temp.arg("run.spool");
    let input = format!("{}\nnot json\n\n{}\n", data("A"), data("B"));

    let run = temp
        .spool()
        .args(&["run", "--sync-file", &store])
        .stdin_raw(&input)
        .passes()
        .stderr_has("unparseable: 1");

    assert_eq!(run.forwarded(), vec!["A", "B"]);
}
