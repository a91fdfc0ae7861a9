// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job discovery: the first unclaimed job file under the job root.

use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

/// Enumerate `pattern` and return the first match not yet claimed.
///
/// Single-job-at-a-time by design: no ordering guarantee across job
/// folders, no priority, first match wins. Unreadable entries are skipped.
pub fn next_job(pattern: &str, started: &HashSet<PathBuf>) -> Option<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(pattern, error = %e, "invalid job glob pattern");
            return None;
        }
    };
    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "skipping unreadable glob entry");
                None
            }
        })
        .find(|path| !started.contains(path))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
