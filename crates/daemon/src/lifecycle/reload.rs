// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live config reload.
//!
//! Poll settings are swapped in place; the poller picks them up at the top of
//! its next cycle. `rpc.client_id` is only read at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event as NotifyEvent, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wr_engine::SettingsHandle;

use crate::config::{ConfigError, ConfigFile};

/// Editors save in bursts (truncate, write, rename).
const RELOAD_SETTLE: Duration = Duration::from_millis(200);

/// Re-read `path` and replace the live settings if they differ.
///
/// The fetched art keys are not part of the file and carry over. Returns
/// whether anything changed. On error the live settings are kept.
pub fn apply_reload(path: &Path, settings: &SettingsHandle) -> Result<bool, ConfigError> {
    let mut next = ConfigFile::load(path)?.poll_settings()?;
    let mut changed = false;
    settings.update(|live| {
        next.art_keys = live.art_keys.take();
        changed = next != *live;
        if changed {
            *live = next;
        } else {
            live.art_keys = next.art_keys;
        }
    });
    Ok(changed)
}

/// Watch the directory holding `path` and reload on every change to it.
///
/// The watcher must be kept alive alongside the returned task.
pub fn watch_config(
    path: PathBuf,
    settings: SettingsHandle,
) -> Result<(RecommendedWatcher, JoinHandle<()>), notify::Error> {
    let (tx, mut rx) = mpsc::channel::<()>(16);
    let file_name = path.file_name().map(|n| n.to_os_string());

    let mut watcher = notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
        let Ok(event) = res else {
            return;
        };
        let touches_config =
            event.paths.iter().any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
        if touches_config && matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            // Full means a reload is already pending.
            let _ = tx.try_send(());
        }
    })?;

    let watch_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;
    debug!(dir = %watch_dir.display(), "watching config directory");

    let task = tokio::spawn(async move {
        while rx.recv().await.is_some() {
            tokio::time::sleep(RELOAD_SETTLE).await;
            while rx.try_recv().is_ok() {}

            match apply_reload(&path, &settings) {
                Ok(true) => info!(path = %path.display(), "config reloaded"),
                Ok(false) => debug!("config unchanged"),
                Err(e) => warn!(error = %e, "keeping previous config"),
            }
        }
    });

    Ok((watcher, task))
}

#[cfg(test)]
#[path = "reload_tests.rs"]
mod tests;
