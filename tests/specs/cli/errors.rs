//! CLI error specs
//!
//! Errors go to stderr with a non-zero exit; stdout stays empty.

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    let temp = Workspace::empty();

    temp.spool().args(&["replay"]).fails();
}

#[test]
fn run_without_sync_file_fails() {
    let temp = Workspace::empty();

    let run = temp
        .spool()
        .args(&["run", "--run-id", "spec"])
        .stdin(&[data("A")])
        .fails()
        .stderr_has("no sync_file configured");
    assert!(run.stdout().is_empty());
}

#[test]
fn dump_of_missing_file_fails() {
    let temp = Workspace::empty();
    let missing = temp.arg("missing.spool");

    temp.spool()
        .args(&["dump", &missing])
        .fails()
        .stderr_has("failed to open");
}

#[test]
fn dump_of_foreign_file_fails() {
    let temp = Workspace::empty();
    temp.write("notes.txt", "not a store\n");
    let file = temp.arg("notes.txt");

    temp.spool()
        .args(&["dump", &file])
        .fails()
        .stderr_has("failed to open");
}

#[test]
fn unreadable_settings_file_fails() {
    let temp = Workspace::empty();
    temp.write("spool.toml", "x_offline = \"maybe\"\n");
    let settings = temp.arg("spool.toml");

    temp.spool()
        .args(&["run", "--settings", &settings])
        .stdin(&[data("A")])
        .fails()
        .stderr_has("failed to load settings");
}
