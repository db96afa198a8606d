// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, config reload, shutdown.

mod logging;
mod reload;
mod startup;

pub use logging::init_logging;
pub use reload::{apply_reload, watch_config};
pub use startup::{startup, startup_with};

use std::fs::File;
use std::path::PathBuf;

use notify::RecommendedWatcher;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;
use wr_adapters::SourceError;
use wr_engine::{PollerStatus, Scheduler, SettingsHandle};

use crate::config::ConfigError;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/wiirpc)
    pub state_dir: PathBuf,
    /// User config file; may not exist
    pub config_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Directory holding the daemon log file
    pub log_dir: PathBuf,
    /// Downloaded data such as the games list
    pub cache_dir: PathBuf,
}

impl Config {
    /// Resolve paths from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::under(crate::env::state_dir()?, crate::env::config_path()?))
    }

    /// Lay out every path below `state_dir`.
    pub fn under(state_dir: PathBuf, config_path: PathBuf) -> Self {
        Self {
            config_path,
            lock_path: state_dir.join("wrd.pid"),
            log_dir: state_dir.join("logs"),
            cache_dir: state_dir.join("cache"),
            state_dir,
        }
    }
}

/// Running daemon: the scheduler with its jobs and the config watcher.
pub struct DaemonState {
    pub config: Config,
    pub scheduler: Scheduler,
    pub settings: SettingsHandle,
    poller_status: watch::Receiver<PollerStatus>,
    poller_failed: watch::Receiver<Option<String>>,
    // Held for the lifetime of the daemon
    _lock_file: File,
    _watcher: RecommendedWatcher,
    reload_task: JoinHandle<()>,
    failure_task: JoinHandle<()>,
}

impl DaemonState {
    pub fn poller_status(&self) -> PollerStatus {
        self.poller_status.borrow().clone()
    }

    /// Resolves with the failure detail once the presence poller has failed.
    /// Cancel-safe; never resolves while the poller is healthy.
    pub async fn poller_failed(&mut self) -> String {
        let detail = match self.poller_failed.wait_for(Option::is_some).await {
            Ok(detail) => detail.clone(),
            Err(_) => None,
        };
        match detail {
            Some(detail) => detail,
            None => std::future::pending().await,
        }
    }

    /// Stop all jobs and release the lock.
    pub async fn shutdown(self) {
        let status = self.poller_status();
        info!(cycles = status.cycles, "shutting down");

        self.scheduler.shutdown();
        self.failure_task.abort();
        self.reload_task.abort();
        let _ = self.reload_task.await;
        let _ = self.failure_task.await;

        if self.config.lock_path.exists() {
            let _ = std::fs::remove_file(&self.config.lock_path);
        }
        info!("daemon stopped");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wiimmfi client error: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to watch config file: {0}")]
    Watch(#[from] notify::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
