// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders and helpers, shared with other crates via the
//! `test-support` feature.

use crate::record::{CommandField, JobInput, JobRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;

crate::builder! {
    pub struct JobInputBuilder => JobInput {
        into { path: PathBuf = "/ngom/abc123/img.dv" }
        set {
            image_id: serde_json::Value = serde_json::Value::Null,
            dataset_id: serde_json::Value = serde_json::Value::Null,
            params: BTreeMap<String, serde_json::Value> = BTreeMap::new(),
        }
    }
}

crate::builder! {
    pub struct JobRecordBuilder => JobRecord {
        into { command: CommandField = "core2_decon" }
        set {
            inputs: Vec<JobInput> = vec![JobInput::builder().build()],
            params: BTreeMap<String, serde_json::Value> = BTreeMap::new(),
        }
    }
}

/// Shorthand for a `par.<name>` parameter entry.
pub fn par(name: &str, value: serde_json::Value) -> (String, serde_json::Value) {
    (format!("par.{name}"), value)
}
