// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration, constructed once at startup.

use jd_core::{PathTranslator, RunMode, MARKER_FILENAME};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_JOB_ROOT: &str = "/ngom";
const DEFAULT_JOB_GLOB: &str = "*.jobs";
const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(10);

/// Daemon configuration.
///
/// Every component receives this (or a piece of it) explicitly; nothing
/// reads process-wide state after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Job root as mounted on this worker.
    pub local_root: PathBuf,
    /// Job root as seen by the submitter. Job files are discovered and
    /// reported in this view.
    pub remote_root: PathBuf,
    /// Glob matching job files inside a job folder.
    pub job_glob: String,
    /// Liveness marker filename inside each job folder.
    pub marker_name: String,
    /// Sleep between idle polls.
    pub poll_delay: Duration,
    /// How handlers execute work.
    pub mode: RunMode,
}

impl Config {
    /// Build the configuration for `mode`, applying environment overrides
    /// from [`crate::env`] over the compiled-in defaults.
    pub fn load(mode: RunMode) -> Self {
        let local_root = crate::env::job_root().unwrap_or_else(|| PathBuf::from(DEFAULT_JOB_ROOT));
        // Both views default to the same mount; deployments with differing
        // mounts set JD_REMOTE_ROOT.
        let remote_root = crate::env::remote_root().unwrap_or_else(|| local_root.clone());
        Self {
            local_root,
            remote_root,
            job_glob: DEFAULT_JOB_GLOB.to_string(),
            marker_name: MARKER_FILENAME.to_string(),
            poll_delay: crate::env::poll_delay().unwrap_or(DEFAULT_POLL_DELAY),
            mode,
        }
    }

    /// Glob pattern for job files: one folder level below the remote root.
    pub fn pattern(&self) -> String {
        self.remote_root.join("*").join(&self.job_glob).to_string_lossy().into_owned()
    }

    /// Translator between the submitter's and this worker's view.
    pub fn translator(&self) -> PathTranslator {
        PathTranslator::new(&self.local_root, &self.remote_root)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
