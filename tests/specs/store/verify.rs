//! `spool verify` specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn verify_reports_clean_store() {
    let temp = Workspace::empty();
    temp.run(&[], &[data("A"), local("B"), data("C")]);
    let store = temp.arg("run.spool");

    temp.spool()
        .args(&["verify", &store])
        .passes()
        .stdout_has("frames:   2")
        .stdout_has("last num: 2")
        .stdout_has("ok");
}

#[test]
fn verify_prints_json_report() {
    let temp = Workspace::empty();
    temp.run(&[], &[data("A")]);
    let store = temp.arg("run.spool");

    let run = temp
        .spool()
        .args(&["verify", &store, "--format", "json"])
        .passes();

    let report: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(report["frames"], 1);
    assert_eq!(report["last_num"], 1);
    assert_eq!(report["version"], 1);
    assert!(report["corruption"].is_null());
}

#[test]
fn verify_fails_on_corrupted_frame() {
    let temp = Workspace::empty();
    temp.run(&[], &[data("A"), data("B")]);
    let path = temp.file("run.spool");
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    std::fs::write(&path, bytes).unwrap();
    let store = temp.arg("run.spool");

    temp.spool()
        .args(&["verify", &store])
        .fails()
        .stdout_has("frames:   1")
        .stdout_has("corrupt at frame 1")
        .stderr_has("is corrupt");
}

#[test]
fn verify_rejects_foreign_file() {
    let temp = Workspace::empty();
    temp.write("foreign.spool", "{\"hello\": \"world\"}\n");
    let store = temp.arg("foreign.spool");

    temp.spool()
        .args(&["verify", &store])
        .fails()
        .stderr_has("failed to read");
}
