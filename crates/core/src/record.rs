// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for job files and result files.
//!
//! A job file holds one JSON [`JobRecord`] per line; each processed record
//! appends one JSON [`JobResult`] line to the co-located result file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The `command` field of a record: a plain name, or a list of names.
///
/// Only the head of a list is ever executed; trailing entries are silently
/// ignored. This matches submitter behavior in the field and must not change
/// without product sign-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandField {
    One(String),
    Many(Vec<String>),
}

impl CommandField {
    /// The command that will actually run.
    pub fn first(&self) -> Option<&str> {
        match self {
            CommandField::One(name) => Some(name.as_str()),
            CommandField::Many(names) => names.first().map(String::as_str),
        }
    }

    /// Number of trailing command names that will never run.
    pub fn ignored(&self) -> usize {
        match self {
            CommandField::One(_) => 0,
            CommandField::Many(names) => names.len().saturating_sub(1),
        }
    }
}

impl From<&str> for CommandField {
    fn from(name: &str) -> Self {
        CommandField::One(name.to_string())
    }
}

impl From<String> for CommandField {
    fn from(name: String) -> Self {
        CommandField::One(name)
    }
}

impl From<Vec<String>> for CommandField {
    fn from(names: Vec<String>) -> Self {
        CommandField::Many(names)
    }
}

/// One input to a command: a data file plus the identifiers the submitter
/// uses to attach results back to its own records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    pub path: PathBuf,
    #[serde(rename = "imageID", default)]
    pub image_id: serde_json::Value,
    #[serde(rename = "datasetID", default)]
    pub dataset_id: serde_json::Value,
    /// Any further per-input parameters, keyed by name.
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

/// One unit of submitted work: a command, its inputs, and job-level
/// parameters (the `par.<name>` keys of the wire shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub command: CommandField,
    #[serde(default)]
    pub inputs: Vec<JobInput>,
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl JobRecord {
    /// Look up a job-level parameter by bare name (`par.alpha` → `par("alpha")`).
    pub fn par(&self, name: &str) -> Option<&serde_json::Value> {
        self.params.get(&format!("par.{name}"))
    }
}

/// Result of processing one record: output artifacts plus the originating
/// identifiers, serialized as a single line of the result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub results: Vec<String>,
    #[serde(rename = "inputID")]
    pub input_id: serde_json::Value,
    #[serde(rename = "datasetID")]
    pub dataset_id: serde_json::Value,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
