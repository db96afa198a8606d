// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wrd`: keeps Discord Rich Presence in sync with Wiimmfi.

use std::process::ExitCode;

use tracing::{error, info};
use wr_daemon::{init_logging, startup, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wrd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("wrd: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(version = env!("CARGO_PKG_VERSION"), "Starting wrd");

    let mut daemon = match startup(&config).await {
        Ok(daemon) => daemon,
        Err(e) => {
            error!("Failed to start daemon: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = tokio::select! {
        _ = wait_for_signal() => ExitCode::SUCCESS,
        detail = daemon.poller_failed() => {
            error!("Presence poller stopped: {detail}");
            ExitCode::FAILURE
        }
    };
    daemon.shutdown().await;
    code
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Received interrupt"),
        _ = term.recv() => info!("Received SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Received interrupt");
}
