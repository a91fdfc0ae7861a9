// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Priism ER deconvolution jobs (`core2_decon`).
//!
//! The real transformation renders a `sh` driver script next to the input
//! image and hands it to Priism's `core2_decon`; fake mode synthesizes the
//! same artifact set without touching Priism.

use crate::handler::{Handler, HandlerError};
use async_trait::async_trait;
use jd_core::{JobRecord, JobResult, RunMode};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Command name this handler is registered under.
pub const COMMAND: &str = "core2_decon";

/// Byte offset of the little-endian `LensNum` field in an Imsubs (DV) header.
const LENS_NUM_OFFSET: usize = 162;

/// Deconvolution environment, supplied at startup.
#[derive(Debug, Clone)]
pub struct DeconConfig {
    /// Priism environment setup script sourced by every driver script.
    pub priism_setup: PathBuf,
    /// Directory holding OTF calibration files.
    pub otf_dir: PathBuf,
    /// Artificial processing latency for fake mode.
    pub fake_delay: Duration,
}

impl Default for DeconConfig {
    fn default() -> Self {
        Self {
            priism_setup: PathBuf::from("/opt/priism/Priism_setup.sh"),
            otf_dir: PathBuf::from("/opt/priism/otf"),
            fake_delay: Duration::from_secs(20),
        }
    }
}

/// Runs ER deconvolution for the first input of a record.
pub struct DeconHandler {
    config: DeconConfig,
}

impl DeconHandler {
    pub fn new(config: DeconConfig) -> Self {
        Self { config }
    }

    /// Fake processing: dummy com and log, input copied as the "deconvolved"
    /// image, plus an artificial delay to emulate processing latency.
    async fn fake_run(&self, input: &Path) -> Result<Vec<String>, HandlerError> {
        let artifacts = Artifacts::for_input(input);
        std::fs::write(&artifacts.com, "# core2 decon dummy com file\n")?;
        std::fs::write(&artifacts.log, "# core2 decon dummy log file\n")?;
        std::fs::copy(input, &artifacts.dv)?;
        tokio::time::sleep(self.config.fake_delay).await;
        Ok(artifacts.into_results())
    }

    async fn real_run(&self, record: &JobRecord, input: &Path) -> Result<Vec<String>, HandlerError> {
        let alpha = require_f64(record, "alpha")?;
        let lamf = require_f64(record, "lamf")?;
        let niter = require_u64(record, "niter")?;

        let otf = self.config.otf_dir.join(otf_for_input(input)?);
        let artifacts = Artifacts::for_input(input);
        let script = driver_script(&self.config.priism_setup, input, &otf, alpha, lamf, niter);
        std::fs::write(&artifacts.com, script)?;
        self.exec_driver(&artifacts.com).await?;
        Ok(artifacts.into_results())
    }

    /// Execute a rendered driver script, returning when Priism is done.
    async fn exec_driver(&self, com: &Path) -> Result<(), HandlerError> {
        let output = tokio::process::Command::new("sh").arg(com).output().await?;
        debug!(
            com = %com.display(),
            stdout = %String::from_utf8_lossy(&output.stdout),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "priism driver finished"
        );
        if !output.status.success() {
            return Err(HandlerError::ExternalProcess(output.status));
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for DeconHandler {
    async fn run(
        &self,
        record: &JobRecord,
        mode: RunMode,
        _job_root: &Path,
    ) -> Result<JobResult, HandlerError> {
        let input = record.inputs.first().ok_or(HandlerError::NoInput)?;
        let results = match mode {
            RunMode::Fake => {
                info!(input = %input.path.display(), "fake deconvolution");
                self.fake_run(&input.path).await?
            }
            _ => match self.real_run(record, &input.path).await {
                Ok(results) => results,
                // Recoverable: missing parameters, unknown calibration, a
                // failed external run. Logged here, never escalated to the
                // poll loop; the submitter sees an empty result set.
                Err(e) => {
                    warn!(input = %input.path.display(), error = %e, "deconvolution failed");
                    Vec::new()
                }
            },
        };
        Ok(JobResult {
            results,
            input_id: input.image_id.clone(),
            dataset_id: input.dataset_id.clone(),
        })
    }
}

/// Output artifact paths for one deconvolution of an input image.
struct Artifacts {
    com: PathBuf,
    log: PathBuf,
    dv: PathBuf,
}

impl Artifacts {
    fn for_input(input: &Path) -> Self {
        let base = input.with_extension("").to_string_lossy().into_owned();
        Self {
            com: PathBuf::from(format!("{base}_ERD.com")),
            log: PathBuf::from(format!("{base}_ERD.log")),
            dv: PathBuf::from(format!("{base}_ERD.dv")),
        }
    }

    /// Result entries in submitter-expected order: image first, then driver
    /// script and log.
    fn into_results(self) -> Vec<String> {
        [self.dv, self.com, self.log]
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }
}

fn require_f64(record: &JobRecord, name: &str) -> Result<f64, HandlerError> {
    record
        .par(name)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| HandlerError::MissingParameter(format!("par.{name}")))
}

fn require_u64(record: &JobRecord, name: &str) -> Result<u64, HandlerError> {
    record
        .par(name)
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| HandlerError::MissingParameter(format!("par.{name}")))
}

fn otf_for_input(input: &Path) -> Result<&'static str, HandlerError> {
    let lens = read_lens_num(input)?;
    otf_for_lens(lens).ok_or(HandlerError::UnknownLens(lens))
}

/// Read the `LensNum` header field of a DV image.
fn read_lens_num(path: &Path) -> Result<i16, HandlerError> {
    let mut file = std::fs::File::open(path)?;
    let mut header = [0u8; LENS_NUM_OFFSET + 2];
    file.read_exact(&mut header)?;
    Ok(i16::from_le_bytes([header[LENS_NUM_OFFSET], header[LENS_NUM_OFFSET + 1]]))
}

/// OTF calibration file for a lens id, as shipped with the facility scopes.
fn otf_for_lens(lens: i16) -> Option<&'static str> {
    Some(match lens {
        130 => "Nikon_40X_130.otf",
        2002 => "Olympus_40X_130_2002.otf",
        2003 => "Olympus_20X_085_2003.otf",
        10002 => "Olympus_100X_140_10002.otf",
        10003 => "Olympus_100X_135_10003.otf",
        10005 => "Olympus_100X_135_10005.otf",
        10007 => "Olympus_100X_140_10007.otf",
        10205 => "Olympus_20X_075_10205.otf",
        10403 => "Olympus_40X_135_10403.otf",
        10404 => "Olympus_40X_085_10404.otf",
        10410 => "Olympus_40X_115_10410.otf",
        10602 => "Olympus_60X_140_10602.otf",
        10603 => "Olympus_60X_120_10603.otf",
        10612 => "Olympus_60X_142_10612.otf",
        12003 => "Nikon_100X_140_12003.otf",
        12601 => "Nikon_60X_140_12601.otf",
        14003 => "Zeiss_100X_140_14003.otf",
        14401 => "Zeiss_40X_130_14401.otf",
        14601 => "Zeiss_63X_140_14601.otf",
        _ => return None,
    })
}

/// Render the `sh` driver script for one deconvolution run.
fn driver_script(
    priism_setup: &Path,
    input: &Path,
    otf: &Path,
    alpha: f64,
    lamf: f64,
    niter: u64,
) -> String {
    let base = input.with_extension("");
    let base = base.display();
    format!(
        r#"#!/bin/sh
#Setting run time environment...
. '{priism}';
#command file for core2_decon
( time core2_decon \
 "{base}.dv" \
 "{base}_ERD.dv" \
 "{otf}" \
 -alpha={alpha} -lamratio=0:1 -lamf={lamf} -lampc=100 \
 -lampos=1 -lamsmooth=100 -cuth=0.001 -na=1.4 -nimm=1.512 -ncycl={niter} \
 -nzpad=64 -omega=0.8 -sub=1:1:1:1:1 -tol=0.0001 -np=4 -oplotfile="" ) \
 >"{base}_ERD.log" 2>&1
"#,
        priism = priism_setup.display(),
        otf = otf.display(),
    )
}

#[cfg(test)]
#[path = "decon_tests.rs"]
mod tests;
