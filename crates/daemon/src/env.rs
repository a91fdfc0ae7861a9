// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// Job root as mounted on this worker (`JD_JOB_ROOT`).
pub fn job_root() -> Option<PathBuf> {
    std::env::var("JD_JOB_ROOT").ok().map(PathBuf::from)
}

/// Job root as seen by the submitter (`JD_REMOTE_ROOT`).
pub fn remote_root() -> Option<PathBuf> {
    std::env::var("JD_REMOTE_ROOT").ok().map(PathBuf::from)
}

/// Idle poll delay override (`JD_POLL_DELAY_MS`).
pub fn poll_delay() -> Option<Duration> {
    std::env::var("JD_POLL_DELAY_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Fake-mode processing latency override (`JD_FAKE_DELAY_MS`).
pub fn fake_delay() -> Option<Duration> {
    std::env::var("JD_FAKE_DELAY_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
