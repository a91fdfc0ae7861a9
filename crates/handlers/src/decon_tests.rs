// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jd_core::test_support::par;
use jd_core::{JobInput, JobRecord};
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;
use yare::parameterized;

fn instant_handler() -> DeconHandler {
    DeconHandler::new(DeconConfig { fake_delay: Duration::ZERO, ..DeconConfig::default() })
}

fn record_for(input: &Path) -> JobRecord {
    JobRecord::builder()
        .inputs(vec![JobInput::builder()
            .path(input.to_path_buf())
            .image_id(json!(42))
            .dataset_id(json!(7))
            .build()])
        .params(BTreeMap::from([
            par("alpha", json!(1000)),
            par("lamf", json!(0.5)),
            par("niter", json!(20)),
        ]))
        .build()
}

#[tokio::test]
async fn fake_mode_synthesizes_artifacts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("img.dv");
    std::fs::write(&input, b"raw image bytes").unwrap();

    let result =
        instant_handler().run(&record_for(&input), RunMode::Fake, dir.path()).await.unwrap();

    assert_eq!(result.input_id, json!(42));
    assert_eq!(result.dataset_id, json!(7));
    assert_eq!(result.results.len(), 3);
    assert!(result.results[0].ends_with("img_ERD.dv"));
    assert!(result.results[1].ends_with("img_ERD.com"));
    assert!(result.results[2].ends_with("img_ERD.log"));

    // The "deconvolved" image is a copy of the input.
    let copied = std::fs::read(dir.path().join("img_ERD.dv")).unwrap();
    assert_eq!(copied, b"raw image bytes");
    assert!(dir.path().join("img_ERD.com").exists());
    assert!(dir.path().join("img_ERD.log").exists());
}

#[tokio::test]
async fn fake_mode_without_input_is_an_error() {
    let record = JobRecord::builder().inputs(vec![]).build();
    let err = instant_handler().run(&record, RunMode::Fake, Path::new("/ngom")).await.unwrap_err();
    assert!(matches!(err, HandlerError::NoInput));
}

#[tokio::test]
async fn real_mode_missing_parameter_yields_empty_results() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("img.dv");
    std::fs::write(&input, b"not a dv header").unwrap();

    let record = JobRecord::builder()
        .inputs(vec![JobInput::builder()
            .path(input)
            .image_id(json!("img-1"))
            .dataset_id(json!(3))
            .build()])
        .build();
    let result = instant_handler().run(&record, RunMode::Process, dir.path()).await.unwrap();

    // Same shape as a successful run, just nothing in it.
    assert!(result.results.is_empty());
    assert_eq!(result.input_id, json!("img-1"));
    assert_eq!(result.dataset_id, json!(3));
}

#[tokio::test]
async fn real_mode_unknown_lens_yields_empty_results() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("img.dv");
    // Valid-length header, but LensNum 0 maps to no calibration file.
    std::fs::write(&input, vec![0u8; 1024]).unwrap();

    let result = instant_handler().run(&record_for(&input), RunMode::Process, dir.path()).await;
    assert!(result.unwrap().results.is_empty());
}

#[test]
fn reads_lens_num_from_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("img.dv");
    let mut header = vec![0u8; 512];
    header[LENS_NUM_OFFSET..LENS_NUM_OFFSET + 2].copy_from_slice(&10612i16.to_le_bytes());
    std::fs::write(&path, header).unwrap();

    assert_eq!(read_lens_num(&path).unwrap(), 10612);
}

#[test]
fn truncated_header_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("img.dv");
    std::fs::write(&path, b"tiny").unwrap();

    assert!(matches!(read_lens_num(&path), Err(HandlerError::Io(_))));
}

#[parameterized(
    olympus_60x = { 10612, "Olympus_60X_142_10612.otf" },
    nikon_100x = { 12003, "Nikon_100X_140_12003.otf" },
    zeiss_63x = { 14601, "Zeiss_63X_140_14601.otf" },
)]
fn known_lenses_map_to_otf_files(lens: i16, otf: &str) {
    assert_eq!(otf_for_lens(lens), Some(otf));
}

#[test]
fn unknown_lens_has_no_otf_file() {
    assert_eq!(otf_for_lens(9999), None);
}

#[test]
fn driver_script_embeds_parameters() {
    let script = driver_script(
        Path::new("/opt/priism/Priism_setup.sh"),
        Path::new("/data/jobs/abc/img.dv"),
        Path::new("/opt/priism/otf/Olympus_60X_142_10612.otf"),
        1000.0,
        0.5,
        20,
    );
    assert!(script.starts_with("#!/bin/sh"));
    assert!(script.contains(". '/opt/priism/Priism_setup.sh';"));
    assert!(script.contains(r#""/data/jobs/abc/img_ERD.dv""#));
    assert!(script.contains("Olympus_60X_142_10612.otf"));
    assert!(script.contains("-alpha=1000"));
    assert!(script.contains("-lamf=0.5"));
    assert!(script.contains("-ncycl=20"));
    assert!(script.contains(r#">"/data/jobs/abc/img_ERD.log" 2>&1"#));
}
