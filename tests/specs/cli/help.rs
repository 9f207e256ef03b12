//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Workspace::empty();

    temp.spool()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("dump")
        .stdout_has("verify");
}

#[test]
fn run_help_lists_flags() {
    let temp = Workspace::empty();

    temp.spool()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--sync-file")
        .stdout_has("--offline")
        .stdout_has("--sync")
        .stdout_has("--settings")
        .stdout_has("--run-id");
}

#[test]
fn version_is_printed() {
    let temp = Workspace::empty();

    temp.spool()
        .args(&["--version"])
        .passes()
        .stdout_has("spool");
}
