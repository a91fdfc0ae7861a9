// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear_env() {
    std::env::remove_var("JD_JOB_ROOT");
    std::env::remove_var("JD_REMOTE_ROOT");
    std::env::remove_var("JD_POLL_DELAY_MS");
}

#[test]
#[serial]
fn defaults_without_overrides() {
    clear_env();
    let config = Config::load(RunMode::Fake);
    assert_eq!(config.local_root, PathBuf::from("/ngom"));
    assert_eq!(config.remote_root, PathBuf::from("/ngom"));
    assert_eq!(config.job_glob, "*.jobs");
    assert_eq!(config.marker_name, "lastalive.txt");
    assert_eq!(config.poll_delay, Duration::from_secs(10));
    assert_eq!(config.mode, RunMode::Fake);
}

#[test]
#[serial]
fn env_overrides_roots_and_delay() {
    clear_env();
    std::env::set_var("JD_JOB_ROOT", "/data/jobs");
    std::env::set_var("JD_REMOTE_ROOT", "/ngom");
    std::env::set_var("JD_POLL_DELAY_MS", "250");

    let config = Config::load(RunMode::Process);
    assert_eq!(config.local_root, PathBuf::from("/data/jobs"));
    assert_eq!(config.remote_root, PathBuf::from("/ngom"));
    assert_eq!(config.poll_delay, Duration::from_millis(250));

    clear_env();
}

#[test]
#[serial]
fn remote_root_defaults_to_local_root() {
    clear_env();
    std::env::set_var("JD_JOB_ROOT", "/data/jobs");

    let config = Config::load(RunMode::Fake);
    assert_eq!(config.remote_root, PathBuf::from("/data/jobs"));

    clear_env();
}

#[test]
fn pattern_spans_one_folder_level() {
    let config = Config {
        local_root: PathBuf::from("/data/jobs"),
        remote_root: PathBuf::from("/ngom"),
        job_glob: "*.jobs".to_string(),
        marker_name: "lastalive.txt".to_string(),
        poll_delay: Duration::from_secs(10),
        mode: RunMode::Fake,
    };
    assert_eq!(config.pattern(), "/ngom/*/*.jobs");
}
