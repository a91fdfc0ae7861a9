// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream session liveness: marker check and job-folder eviction.

use super::EngineError;
use jd_core::{Clock, LivenessMarker};
use std::path::Path;
use tracing::warn;

/// Decides whether the session owning a job folder is still alive, and
/// evicts the folder when it is not.
pub struct LivenessMonitor<C: Clock> {
    marker_name: String,
    clock: C,
}

impl<C: Clock> LivenessMonitor<C> {
    pub fn new(marker_name: impl Into<String>, clock: C) -> Self {
        Self { marker_name: marker_name.into(), clock }
    }

    /// Check the marker for the folder holding `job_file` (local view).
    ///
    /// A stale session evicts the whole folder (best-effort; eviction can
    /// legitimately race with the submitter, so removal failures are logged
    /// and swallowed) and reports [`EngineError::DeadSession`]. An alive
    /// session returns `Ok(())`.
    pub fn check(&self, job_file: &Path) -> Result<(), EngineError> {
        let folder = job_file.parent().unwrap_or(job_file);
        let marker_path = folder.join(&self.marker_name);
        let text = std::fs::read_to_string(&marker_path)
            .map_err(|source| EngineError::Storage { path: marker_path.clone(), source })?;
        let marker = LivenessMarker::parse(&text)
            .map_err(|source| EngineError::Marker { path: marker_path, source })?;

        if marker.is_alive(self.clock.epoch_secs()) {
            return Ok(());
        }

        warn!(folder = %folder.display(), "upstream session went silent, evicting job folder");
        if let Err(e) = std::fs::remove_dir_all(folder) {
            // Advisory only; the DeadSession signal is the authoritative outcome.
            warn!(folder = %folder.display(), error = %e, "job folder eviction failed");
        }
        Err(EngineError::DeadSession { job_file: job_file.to_path_buf() })
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
