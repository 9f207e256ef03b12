// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record model flowing from the handler through the writer
//!
//! A record is either a control/meta `Request`, one of the data variants,
//! or unset. Only data records are eligible for the durable log.

use serde::{Deserialize, Serialize};

/// One unit of telemetry or control data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Sequence number in the durable log; 0 until the writer assigns one
    #[serde(default)]
    pub num: u64,
    /// Payload variant; `None` marks a malformed record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// Per-record routing overrides
    #[serde(default)]
    pub control: Control,
    /// Originator-assigned identifier, opaque to the pipeline
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

/// Per-record flags overriding default persistence and forwarding rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Control {
    /// Never write this record to the durable log
    pub local: bool,
    /// Forward this record even while offline
    pub always_send: bool,
}

/// Payload of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Run(RunRecord),
    History(HistoryRecord),
    Summary(SummaryRecord),
    Config(ConfigRecord),
    Output(OutputRecord),
    Files(FilesRecord),
    Stats(StatsRecord),
    Artifact(ArtifactRecord),
    Metric(MetricRecord),
    Alert(AlertRecord),
    Exit(ExitRecord),
    Preempting,
    Request(Request),
}

/// Routing class of a record, derived from its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Control/meta message: always forwarded, never persisted
    Request,
    /// Telemetry data: forwarded and persisted subject to control flags
    Data,
    /// No payload set
    Unset,
}

/// Key with a JSON-encoded value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub value_json: String,
}

impl Item {
    pub fn new(key: impl Into<String>, value_json: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_json: value_json.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRecord {
    pub run_id: String,
    pub project: String,
    pub entity: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    pub step: Option<i64>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRecord {
    pub update: Vec<Item>,
    pub remove: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRecord {
    pub update: Vec<Item>,
    pub remove: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputRecord {
    pub stream: OutputStream,
    pub line: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePolicy {
    #[default]
    End,
    Live,
    Now,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileItem {
    pub path: String,
    pub policy: FilePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesRecord {
    pub files: Vec<FileItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsRecord {
    pub timestamp_micros: u64,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub digest: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRecord {
    pub name: String,
    pub step_metric: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRecord {
    pub title: String,
    pub text: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitRecord {
    pub exit_code: i32,
    pub runtime_secs: u64,
}

/// Control/meta messages addressed to the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    Defer { state: u32 },
    Status,
    PollExit,
    ServerInfo,
    Keepalive,
    Shutdown,
}

impl RecordType {
    /// Short variant name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            RecordType::Run(_) => "run",
            RecordType::History(_) => "history",
            RecordType::Summary(_) => "summary",
            RecordType::Config(_) => "config",
            RecordType::Output(_) => "output",
            RecordType::Files(_) => "files",
            RecordType::Stats(_) => "stats",
            RecordType::Artifact(_) => "artifact",
            RecordType::Metric(_) => "metric",
            RecordType::Alert(_) => "alert",
            RecordType::Exit(_) => "exit",
            RecordType::Preempting => "preempting",
            RecordType::Request(_) => "request",
        }
    }
}

impl Record {
    /// Create a record carrying the given payload with default control flags
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type: Some(record_type),
            ..Self::default()
        }
    }

    /// Create a request record
    pub fn request(request: Request) -> Self {
        Self::new(RecordType::Request(request))
    }

    /// Set the `local` control flag
    pub fn local(mut self) -> Self {
        self.control.local = true;
        self
    }

    /// Set the `always_send` control flag
    pub fn always_send(mut self) -> Self {
        self.control.always_send = true;
        self
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    pub fn kind(&self) -> RecordKind {
        match &self.record_type {
            Some(RecordType::Request(_)) => RecordKind::Request,
            Some(_) => RecordKind::Data,
            None => RecordKind::Unset,
        }
    }

    /// Variant name for diagnostics, `"unset"` when there is no payload
    pub fn type_name(&self) -> &'static str {
        self.record_type.as_ref().map_or("unset", RecordType::name)
    }

    /// Encode the record into the bytes stored in a log frame
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a record from log frame bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
