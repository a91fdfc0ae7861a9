// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jdd` — the jobdrop polling daemon.
//!
//! Runs forever, polling the shared job root for work. The only way out is
//! an interrupt, which exits cleanly with status 0.

use jd_core::{RunMode, SystemClock};
use jd_daemon::{Config, PollLoop};
use jd_handlers::{decon, DeconConfig, DeconHandler, HandlerRegistry};
use std::process::ExitCode;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn usage(program: &str) -> String {
    format!("Usage: {program} [mode]   # valid modes: {}", RunMode::USABLE.join(", "))
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();
    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "jdd".to_string());
    let mode = match args.next().map(|arg| arg.parse::<RunMode>()) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            eprintln!("{e}\n{}", usage(&program));
            return ExitCode::FAILURE;
        }
        None => {
            eprintln!("{}", usage(&program));
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = init_tracing();

    if mode.is_reserved() {
        eprintln!("mode {mode} is not implemented");
        return ExitCode::FAILURE;
    }

    let config = Config::load(mode);
    let mut decon_config = DeconConfig::default();
    if let Some(delay) = jd_daemon::env::fake_delay() {
        decon_config.fake_delay = delay;
    }
    let mut registry = HandlerRegistry::new();
    registry.register(decon::COMMAND, DeconHandler::new(decon_config));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    PollLoop::new(config, registry, SystemClock, shutdown_rx).run().await;
    info!("daemon stopped");
    ExitCode::SUCCESS
}
