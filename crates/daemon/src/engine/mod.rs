// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch core: discovery, liveness gating, path translation, handler
//! invocation, and result persistence.
//!
//! One record is fully processed before the next is considered; the only
//! suspension point is the idle sleep between polls. Interrupts are observed
//! between iterations, never mid-handler.

pub mod discovery;
mod error;
pub mod monitor;
pub mod store;

pub use error::EngineError;

use crate::config::Config;
use jd_core::{Clock, JobRecord, JobResult, PathTranslator};
use jd_handlers::HandlerRegistry;
use monitor::LivenessMonitor;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Outcome of a single poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No unclaimed job file was found.
    Idle,
    /// One job file was claimed and processed to completion.
    Worked,
}

/// The daemon's poll-dispatch loop.
pub struct PollLoop<C: Clock> {
    config: Config,
    registry: HandlerRegistry,
    translator: PathTranslator,
    monitor: LivenessMonitor<C>,
    /// Job files claimed by this daemon run. Never persisted: a restart may
    /// reprocess files that are still in the job root, by design.
    started: HashSet<PathBuf>,
    shutdown: watch::Receiver<bool>,
}

impl<C: Clock> PollLoop<C> {
    pub fn new(
        config: Config,
        registry: HandlerRegistry,
        clock: C,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let translator = config.translator();
        let monitor = LivenessMonitor::new(config.marker_name.clone(), clock);
        Self { config, registry, translator, monitor, started: HashSet::new(), shutdown }
    }

    /// Job files claimed so far in this run.
    pub fn started(&self) -> &HashSet<PathBuf> {
        &self.started
    }

    /// Poll until the shutdown flag flips. Sleeps only when idle; a bad job
    /// file is logged and survived.
    pub async fn run(&mut self) {
        info!(pattern = %self.config.pattern(), mode = %self.config.mode, "polling for jobs");
        while !*self.shutdown.borrow() {
            match self.poll_once().await {
                Ok(PollOutcome::Worked) => {} // more work may be waiting, don't sleep
                Ok(PollOutcome::Idle) => self.idle_sleep().await,
                Err(e) => self.log_abandoned(&e),
            }
        }
        info!("poll loop stopped");
    }

    /// One iteration: discover, claim, process one job file.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, EngineError> {
        let Some(job_file) = discovery::next_job(&self.config.pattern(), &self.started) else {
            return Ok(PollOutcome::Idle);
        };

        // Claim before any I/O on the contents: a crash mid-processing must
        // not lead to an automatic retry within this run.
        self.started.insert(job_file.clone());
        info!(job_file = %job_file.display(), claimed = self.started.len(), "new job");

        self.process_job_file(&job_file).await?;
        Ok(PollOutcome::Worked)
    }

    /// Process every record of one job file, in file order.
    ///
    /// The liveness check runs again before each record, so a dead session
    /// stops a long job file between records. Each result is appended as
    /// soon as its record finishes; earlier lines survive later failures.
    async fn process_job_file(&self, job_file: &Path) -> Result<(), EngineError> {
        let local = self.translator.to_local(job_file);
        let records = store::load_records(&local)?;
        let results_at = store::result_path(&local);
        for record in &records {
            self.monitor.check(&local)?;
            let result = self.run_record(record, job_file).await?;
            store::append_result(&results_at, &result)?;
        }
        Ok(())
    }

    /// Dispatch one record to its handler, translating paths both ways.
    async fn run_record(
        &self,
        record: &JobRecord,
        job_file: &Path,
    ) -> Result<JobResult, EngineError> {
        let command = record
            .command
            .first()
            .ok_or_else(|| EngineError::EmptyCommand { job_file: job_file.to_path_buf() })?;
        if record.command.ignored() > 0 {
            debug!(command, ignored = record.command.ignored(), "running only the first command");
        }
        let handler = self.registry.get(command).ok_or_else(|| EngineError::UnknownCommand {
            command: command.to_string(),
            job_file: job_file.to_path_buf(),
        })?;

        let localized = self.localize_inputs(record);
        let mut result = handler
            .run(&localized, self.config.mode, &self.config.local_root)
            .await
            .map_err(|source| EngineError::Handler {
                command: command.to_string(),
                job_file: job_file.to_path_buf(),
                source,
            })?;
        self.remotize_results(&mut result);
        Ok(result)
    }

    /// Rewrite every input path to this worker's view.
    fn localize_inputs(&self, record: &JobRecord) -> JobRecord {
        let mut localized = record.clone();
        for input in &mut localized.inputs {
            input.path = self.translator.to_local(&input.path);
        }
        localized
    }

    /// Rewrite artifact paths back to the submitter's view. Entries that are
    /// not local paths (opaque ids) pass through untouched.
    fn remotize_results(&self, result: &mut JobResult) {
        for entry in &mut result.results {
            let path = Path::new(entry.as_str());
            if self.translator.is_local(path) {
                let remote = self.translator.to_remote(path).to_string_lossy().into_owned();
                *entry = remote;
            }
        }
    }

    /// Sleep the poll delay, waking early on shutdown.
    async fn idle_sleep(&mut self) {
        debug!(
            delay_secs = self.config.poll_delay.as_secs_f64(),
            claimed = self.started.len(),
            "no new jobs"
        );
        let delay = tokio::time::sleep(self.config.poll_delay);
        tokio::pin!(delay);
        tokio::select! {
            _ = &mut delay => {}
            result = self.shutdown.changed() => {
                // A dropped sender can never signal again; finish the delay.
                if result.is_err() {
                    delay.await;
                }
            }
        }
    }

    /// Loop-level failure policy: log, keep the file claimed, carry on.
    fn log_abandoned(&self, err: &EngineError) {
        match err {
            EngineError::DeadSession { job_file } => {
                warn!(job_file = %job_file.display(), "abandoned job file, upstream session died");
            }
            EngineError::UnknownCommand { command, job_file } => {
                warn!(command = %command, job_file = %job_file.display(), "abandoned job file, unknown command");
            }
            other => warn!(error = %other, "abandoned job file"),
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
