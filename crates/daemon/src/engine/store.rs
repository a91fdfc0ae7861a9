// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading job files and appending result lines.
//!
//! Canonical job-file encoding: one JSON [`JobRecord`] per line, blank lines
//! ignored. The one-array-per-file encoding used by some older submitters is
//! deliberately NOT accepted; the two are mutually ambiguous.

use super::EngineError;
use jd_core::{JobRecord, JobResult};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Parse every record of a job file, in file order.
pub fn load_records(path: &Path) -> Result<Vec<JobRecord>, EngineError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| EngineError::Storage { path: path.to_path_buf(), source })?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|source| EngineError::Malformed { path: path.to_path_buf(), source })
        })
        .collect()
}

/// Result file co-located with the job file: same base name, `.results`
/// suffix.
pub fn result_path(job_file: &Path) -> PathBuf {
    job_file.with_extension("results")
}

/// Serialize one result and append it immediately, so records already
/// written survive a later failure in the same job file.
pub fn append_result(path: &Path, result: &JobResult) -> Result<(), EngineError> {
    let mut line = serde_json::to_string(result)
        .map_err(|source| EngineError::Malformed { path: path.to_path_buf(), source })?;
    line.push('\n');
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(line.as_bytes()))
        .map_err(|source| EngineError::Storage { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
