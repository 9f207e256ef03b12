// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run settings consumed by the writer
//!
//! Settings are a read-only snapshot once the pipeline starts. They load
//! from TOML and accept a small set of environment overrides.

use crate::id::IdGen;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable forcing offline mode
pub const ENV_OFFLINE: &str = "SPOOL_OFFLINE";
/// Environment variable overriding the log path
pub const ENV_SYNC_FILE: &str = "SPOOL_SYNC_FILE";
/// Environment variable overriding the run identifier
pub const ENV_RUN_ID: &str = "SPOOL_RUN_ID";

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Configuration snapshot for one pipeline instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run identifier, used only for diagnostics
    pub run_id: Option<String>,
    /// Destination of the append-only log
    pub sync_file: Option<PathBuf>,
    /// Suppress network transmission of data records
    pub x_offline: bool,
    /// Replaying an already-offline run; no new log is created
    pub x_sync: bool,
}

impl Settings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `SPOOL_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self, SettingsError> {
        self.apply_env_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides using the given variable lookup
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_OFFLINE) {
            self.x_offline = parse_bool(ENV_OFFLINE, &value)?;
        }
        if let Some(value) = lookup(ENV_SYNC_FILE).filter(|v| !v.is_empty()) {
            self.sync_file = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_RUN_ID).filter(|v| !v.is_empty()) {
            self.run_id = Some(value);
        }
        Ok(self)
    }

    /// Fill in a generated run identifier when none is set
    pub fn ensure_run_id(mut self, id_gen: &impl IdGen) -> Self {
        if self.run_id.is_none() {
            self.run_id = Some(id_gen.next());
        }
        self
    }

    pub fn run_id(&self) -> &str {
        self.run_id.as_deref().unwrap_or("")
    }

    pub fn sync_file(&self) -> Option<&Path> {
        self.sync_file.as_deref()
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(SettingsError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
