// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler contract and command registry.

use async_trait::async_trait;
use jd_core::{JobRecord, JobResult, RunMode};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Failures a handler can surface to the daemon loop.
///
/// Recoverable conditions inside the real transformation (a missing
/// parameter, unknown calibration, a nonzero external exit) stay inside the
/// handler: it logs them and returns a best-effort result instead.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("record has no inputs")]
    NoInput,

    #[error("missing job parameter {0:?}")]
    MissingParameter(String),

    #[error("no calibration file for lens {0}")]
    UnknownLens(i16),

    #[error("external process exited with {0}")]
    ExternalProcess(std::process::ExitStatus),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A pluggable executor for one command.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Execute `record` and produce its result.
    ///
    /// Input paths arrive in the local view and returned artifact paths are
    /// local too; the daemon rewrites them for the submitter. `job_root` is
    /// the local job root.
    async fn run(
        &self,
        record: &JobRecord,
        mode: RunMode,
        job_root: &Path,
    ) -> Result<JobResult, HandlerError>;
}

/// Command-name → handler mapping, populated once at startup.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: Handler + 'static>(&mut self, command: impl Into<String>, handler: H) {
        self.handlers.insert(command.into(), Arc::new(handler));
    }

    pub fn get(&self, command: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(command).cloned()
    }

    /// Registered command names, in no particular order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
