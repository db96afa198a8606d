// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

/// Resolve state directory: WR_STATE_DIR > XDG_STATE_HOME/wiirpc > ~/.local/state/wiirpc
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("WR_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("wiirpc"));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".local/state/wiirpc"))
}

/// Resolve config file: WR_CONFIG > XDG_CONFIG_HOME/wiirpc/config.toml > platform config dir
pub fn config_path() -> Result<PathBuf, LifecycleError> {
    if let Ok(path) = std::env::var("WR_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("wiirpc/config.toml"));
    }
    let dir = dirs::config_dir().ok_or(LifecycleError::NoConfigDir)?;
    Ok(dir.join("wiirpc/config.toml"))
}

/// Tracing filter directive (default `info`).
pub fn log_filter() -> String {
    std::env::var("WR_LOG").ok().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "info".into())
}

/// Override for the Wiimmfi base URL, used against mirrors and local fixtures.
pub fn wiimmfi_url() -> Option<String> {
    std::env::var("WR_WIIMMFI_URL").ok().filter(|s| !s.is_empty())
}

/// Override for the Discord web API base, used for the asset list.
pub fn discord_api_url() -> Option<String> {
    std::env::var("WR_DISCORD_API_URL").ok().filter(|s| !s.is_empty())
}

/// Directories searched for the Discord IPC socket, most specific first.
pub fn discord_ipc_dirs() -> Vec<PathBuf> {
    ipc_dirs_from(|var| std::env::var_os(var))
}

fn ipc_dirs_from(lookup: impl Fn(&str) -> Option<OsString>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = ["XDG_RUNTIME_DIR", "TMPDIR", "TMP", "TEMP"]
        .into_iter()
        .filter_map(|var| lookup(var))
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect();
    let tmp = PathBuf::from("/tmp");
    if !dirs.contains(&tmp) {
        dirs.push(tmp);
    }
    dirs
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
