// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness marker parsing.
//!
//! The upstream submitter refreshes a two-line marker file in every job
//! folder: last-observed-activity time, then the maximum allowed silence
//! interval ("pulse"), both in fractional epoch seconds. The daemon only
//! ever reads this file; writing it is the submitter's job.

use thiserror::Error;

/// Marker filename inside each job folder.
pub const MARKER_FILENAME: &str = "lastalive.txt";

/// Parsed contents of a liveness marker file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivenessMarker {
    pub last_alive_secs: f64,
    pub pulse_secs: f64,
}

/// Marker file contents that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    #[error("liveness marker is missing line {0}")]
    MissingLine(usize),

    #[error("invalid number on liveness marker line {line}: {text:?}")]
    BadNumber { line: usize, text: String },
}

impl LivenessMarker {
    /// Parse the two-line marker format.
    pub fn parse(text: &str) -> Result<Self, MarkerError> {
        let mut lines = text.lines();
        let last_alive_secs = parse_line(lines.next(), 1)?;
        let pulse_secs = parse_line(lines.next(), 2)?;
        Ok(Self { last_alive_secs, pulse_secs })
    }

    /// Whether the owning session is still alive at `now_secs`.
    ///
    /// Non-strict: a session exactly at its pulse interval is still alive.
    pub fn is_alive(&self, now_secs: f64) -> bool {
        now_secs - self.last_alive_secs <= self.pulse_secs
    }
}

fn parse_line(line: Option<&str>, number: usize) -> Result<f64, MarkerError> {
    let text = line.ok_or(MarkerError::MissingLine(number))?;
    text.trim()
        .parse::<f64>()
        .map_err(|_| MarkerError::BadNumber { line: number, text: text.to_string() })
}

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
