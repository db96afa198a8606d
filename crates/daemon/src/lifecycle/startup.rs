// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and initialization logic.

use std::io::Write;

use fs2::FileExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::info;
use wr_adapters::{
    DesktopAlerts, DiscordAssets, DiscordConfig, DiscordIpcSink, ErrorReporter, MkwRoomSource,
    PresenceSink, WiimmfiCatalog, WiimmfiConfig, WiimmfiSource,
};
use wr_core::{JobEvent, JobEventKind, JobId, JobStatus, SystemClock};
use wr_engine::{
    GameArtRefresh, GameListRefresh, PresencePoller, Scheduler, SettingsHandle, TracingObserver,
};

use super::{reload, Config, DaemonState, LifecycleError};
use crate::config::ConfigFile;

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    startup_with(config, DesktopAlerts::new(), DiscordIpcSink::new).await
}

/// Start the daemon with the given error reporter and presence sink.
pub async fn startup_with<R, S>(
    config: &Config,
    reporter: R,
    make_sink: impl FnOnce(DiscordConfig) -> S,
) -> Result<DaemonState, LifecycleError>
where
    R: ErrorReporter,
    S: PresenceSink,
{
    match startup_inner(config, reporter, make_sink).await {
        Ok(state) => Ok(state),
        Err(e) => {
            // The lock file belongs to the already-running daemon.
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner<R, S>(
    config: &Config,
    reporter: R,
    make_sink: impl FnOnce(DiscordConfig) -> S,
) -> Result<DaemonState, LifecycleError>
where
    R: ErrorReporter,
    S: PresenceSink,
{
    // 1. Create state directories
    std::fs::create_dir_all(&config.state_dir)?;
    std::fs::create_dir_all(&config.cache_dir)?;

    // 2. Acquire lock file FIRST: one presence per user session
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Load configuration
    let file = ConfigFile::load(&config.config_path)?;
    let client_id = file.client_id()?.to_string();
    let settings = SettingsHandle::new(file.poll_settings()?);
    info!(
        path = %config.config_path.display(),
        identities = settings.snapshot().identities.len(),
        "Loaded config"
    );

    // 4. Set up adapters
    let mut wiimmfi = WiimmfiConfig::default();
    if let Some(url) = crate::env::wiimmfi_url() {
        wiimmfi.base_url = url;
    }
    let mut discord = DiscordConfig::new(client_id);
    discord.ipc_dirs = crate::env::discord_ipc_dirs();
    if let Some(url) = crate::env::discord_api_url() {
        discord.api_base = url;
    }
    let source = WiimmfiSource::new(wiimmfi.clone())?;
    let rooms = MkwRoomSource::new(wiimmfi.clone())?;
    let catalog = WiimmfiCatalog::new(wiimmfi)?;
    let assets = DiscordAssets::new(&discord)?;
    let sink = make_sink(discord);

    // 5. Start the scheduler and its jobs
    let scheduler = Scheduler::start(TracingObserver, reporter);
    let events = scheduler.subscribe();
    let poller = PresencePoller::new(source, rooms, sink, SystemClock, settings.clone());
    let poller_status = poller.status();
    let poller_id = scheduler.submit(poller);
    let (failed_tx, poller_failed) = watch::channel(None);
    let failure_task = watch_poller(scheduler.clone(), events, poller_id, failed_tx);

    scheduler.submit(GameArtRefresh::new(assets, settings.clone()));
    scheduler.submit(GameListRefresh::new(catalog, SystemClock, config.cache_dir.clone()));
    let startup_jobs = scheduler.clone();
    tokio::spawn(async move {
        startup_jobs.wait_idle().await;
        info!(stats = ?startup_jobs.stats(), "Startup jobs finished");
    });

    // 6. Follow config edits
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let (watcher, reload_task) =
        match reload::watch_config(config.config_path.clone(), settings.clone()) {
            Ok(pair) => pair,
            Err(e) => {
                failure_task.abort();
                scheduler.shutdown();
                return Err(e.into());
            }
        };

    info!(pid = std::process::id(), "Daemon started");

    Ok(DaemonState {
        config: config.clone(),
        scheduler,
        settings,
        poller_status,
        poller_failed,
        _lock_file: lock_file,
        _watcher: watcher,
        reload_task,
        failure_task,
    })
}

/// Publish the poller's failure detail once it fails.
///
/// Lagging behind the event stream falls back to the job snapshot.
fn watch_poller(
    scheduler: Scheduler,
    mut events: broadcast::Receiver<JobEvent>,
    poller_id: JobId,
    failed: watch::Sender<Option<String>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let detail = match events.recv().await {
                Ok(JobEvent { job_id, kind: JobEventKind::Failed { detail }, .. })
                    if job_id == poller_id =>
                {
                    detail
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(_)) => match scheduler.job(&poller_id).map(|j| j.status) {
                    Some(JobStatus::Failed(detail)) => detail,
                    _ => continue,
                },
                Err(RecvError::Closed) => return,
            };
            let _ = failed.send(Some(detail));
            return;
        }
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
