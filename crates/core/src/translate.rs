// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translation between the submitter's and the worker's view of job storage.
//!
//! Both sides mount the same shared storage under different root prefixes and
//! agree on everything below the job-folder segment, so translation is a
//! rebase of the last two path segments (job folder, file name) onto the
//! other root.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Bidirectional path mapping between a remote root and a local root.
#[derive(Debug, Clone)]
pub struct PathTranslator {
    local_root: PathBuf,
    remote_root: PathBuf,
}

impl PathTranslator {
    pub fn new(local_root: impl Into<PathBuf>, remote_root: impl Into<PathBuf>) -> Self {
        Self { local_root: local_root.into(), remote_root: remote_root.into() }
    }

    /// Rebuild `path` under the local root.
    ///
    /// There is no error path: input with fewer than two named segments
    /// degrades silently (the caller gets whatever segments exist, rebased).
    pub fn to_local(&self, path: &Path) -> PathBuf {
        rebase(path, &self.local_root)
    }

    /// Rebuild `path` under the remote root.
    pub fn to_remote(&self, path: &Path) -> PathBuf {
        rebase(path, &self.remote_root)
    }

    /// Whether `path` already lives under the local root.
    pub fn is_local(&self, path: &Path) -> bool {
        path.starts_with(&self.local_root)
    }
}

fn rebase(path: &Path, root: &Path) -> PathBuf {
    let mut tail: Vec<&OsStr> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(seg) => Some(seg),
            _ => None,
        })
        .collect();
    let keep = tail.split_off(tail.len().saturating_sub(2));
    let mut out = root.to_path_buf();
    for seg in keep {
        out.push(seg);
    }
    out
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
