//! Shared helpers for CLI specs
//!
//! `Workspace` owns a scratch directory; `workspace.spool()` builds an
//! invocation of the binary inside it.

#![allow(dead_code)]

pub use similar_asserts::assert_eq;

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path of the `spool` binary next to this test executable
fn spool_bin() -> PathBuf {
    let mut dir = std::env::current_exe().expect("test executable path");
    dir.pop();
    if dir.ends_with("deps") {
        dir.pop();
    }
    let bin = dir.join(format!("spool{}", std::env::consts::EXE_SUFFIX));
    assert!(
        bin.exists(),
        "spool binary not found at {}; build the workspace first",
        bin.display()
    );
    bin
}

/// Scratch directory a spec runs in
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the workspace
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Absolute path as a CLI argument
    pub fn arg(&self, name: &str) -> String {
        self.file(name).display().to_string()
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.file(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent directory");
        }
        std::fs::write(path, content).expect("failed to write file");
    }

    pub fn spool(&self) -> CliBuilder {
        let mut cmd = Command::new(spool_bin());
        cmd.current_dir(self.path())
            .env_remove("SPOOL_OFFLINE")
            .env_remove("SPOOL_SYNC_FILE")
            .env_remove("SPOOL_RUN_ID")
            .env_remove("SPOOL_LOG");
        CliBuilder {
            cmd,
            stdin: String::new(),
        }
    }

    /// Run `spool run` over `records` with the workspace's default store
    pub fn run(&self, extra: &[&str], records: &[String]) -> RunAssert {
        let store = self.arg("run.spool");
        let mut args = vec!["run", "--run-id", "spec", "--sync-file", store.as_str()];
        args.extend_from_slice(extra);
        self.spool().args(&args).stdin(records).passes()
    }

    /// Records persisted in a store file, via `spool dump`
    pub fn dump(&self, name: &str) -> Vec<Value> {
        let file = self.arg(name);
        self.spool().args(&["dump", &file]).passes().stdout_json_lines()
    }
}

pub struct CliBuilder {
    cmd: Command,
    stdin: String,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Feed records to stdin, one per line
    pub fn stdin(mut self, lines: &[String]) -> Self {
        self.stdin = lines.join("\n");
        self.stdin.push('\n');
        self
    }

    pub fn stdin_raw(mut self, text: &str) -> Self {
        self.stdin = text.to_string();
        self
    }

    fn output(mut self) -> RunAssert {
        let output = self
            .cmd
            .write_stdin(self.stdin)
            .output()
            .expect("failed to run spool");
        RunAssert { output }
    }

    pub fn passes(self) -> RunAssert {
        let run = self.output();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr:\n{}",
            run.output.status,
            run.stderr()
        );
        run
    }

    pub fn fails(self) -> RunAssert {
        let run = self.output();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout missing {:?}:\n{}",
            expected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr missing {:?}:\n{}",
            expected,
            stderr
        );
        self
    }

    pub fn stdout_json_lines(&self) -> Vec<Value> {
        self.stdout()
            .lines()
            .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
            .collect()
    }

    /// `uuid` of every record printed to stdout
    pub fn forwarded(&self) -> Vec<String> {
        uuids(&self.stdout_json_lines())
    }
}

pub fn uuids(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["uuid"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub fn nums(records: &[Value]) -> Vec<u64> {
    records
        .iter()
        .map(|r| r["num"].as_u64().unwrap_or_default())
        .collect()
}

/// A history record
pub fn data(uuid: &str) -> String {
    format!(
        r#"{{"uuid":"{}","record_type":{{"history":{{"step":1,"items":[{{"key":"loss","value_json":"0.5"}}]}}}}}}"#,
        uuid
    )
}

/// A history record never written to the store
pub fn local(uuid: &str) -> String {
    with_control(&data(uuid), r#"{"local":true}"#)
}

/// A history record forwarded even while offline
pub fn always_send(uuid: &str) -> String {
    with_control(&data(uuid), r#"{"always_send":true}"#)
}

/// A status request
pub fn request(uuid: &str) -> String {
    format!(r#"{{"uuid":"{}","record_type":{{"request":"status"}}}}"#, uuid)
}

/// A record with no payload
pub fn unset(uuid: &str) -> String {
    format!(r#"{{"uuid":"{}"}}"#, uuid)
}

fn with_control(record: &str, control: &str) -> String {
    let mut value: Value = serde_json::from_str(record).expect("record JSON");
    value["control"] = serde_json::from_str(control).expect("control JSON");
    value.to_string()
}
