// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine failure taxonomy.
//!
//! Every variant abandons the current job file and lets the poll loop carry
//! on; nothing here is fatal to the daemon. Interrupts are not an error,
//! they are the shutdown flag observed by [`super::PollLoop::run`].

use jd_core::MarkerError;
use jd_handlers::HandlerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Command name absent from the registry.
    #[error("unknown command {command:?} in {}", job_file.display())]
    UnknownCommand { command: String, job_file: PathBuf },

    /// Record whose command list is empty.
    #[error("record without a command in {}", job_file.display())]
    EmptyCommand { job_file: PathBuf },

    /// The upstream session owning the job folder went silent.
    #[error("upstream session died for {}", job_file.display())]
    DeadSession { job_file: PathBuf },

    /// I/O failure on a job, result, or marker file.
    #[error("storage error on {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Job or result content that does not parse.
    #[error("malformed content in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Marker file contents that cannot be interpreted.
    #[error("bad liveness marker {}: {source}", path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: MarkerError,
    },

    /// A handler refused the record outright (contract violations and
    /// environment failures; recoverable transformation errors never
    /// surface here).
    #[error("handler {command:?} failed on {}: {source}", job_file.display())]
    Handler {
        command: String,
        job_file: PathBuf,
        #[source]
        source: HandlerError,
    },
}
