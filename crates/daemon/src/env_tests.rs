// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear() {
    for var in [
        "WR_STATE_DIR",
        "XDG_STATE_HOME",
        "WR_CONFIG",
        "XDG_CONFIG_HOME",
        "WR_LOG",
        "WR_DISCORD_API_URL",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn explicit_state_dir_wins() {
    clear();
    std::env::set_var("WR_STATE_DIR", "/tmp/wr-state");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/wr-state"));
    clear();
}

#[test]
#[serial]
fn xdg_state_home_gets_app_subdir() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/wiirpc"));
    clear();
}

#[test]
#[serial]
fn config_path_precedence() {
    clear();
    std::env::set_var("XDG_CONFIG_HOME", "/tmp/cfg");
    assert_eq!(config_path().unwrap(), PathBuf::from("/tmp/cfg/wiirpc/config.toml"));

    std::env::set_var("WR_CONFIG", "/etc/wiirpc.toml");
    assert_eq!(config_path().unwrap(), PathBuf::from("/etc/wiirpc.toml"));
    clear();
}

#[test]
#[serial]
fn log_filter_defaults_to_info() {
    clear();
    assert_eq!(log_filter(), "info");
    std::env::set_var("WR_LOG", "  ");
    assert_eq!(log_filter(), "info");
    std::env::set_var("WR_LOG", "wr_engine=debug");
    assert_eq!(log_filter(), "wr_engine=debug");
    clear();
}

#[test]
#[serial]
fn discord_api_url_is_optional() {
    clear();
    assert_eq!(discord_api_url(), None);
    std::env::set_var("WR_DISCORD_API_URL", "http://127.0.0.1:9/api");
    assert_eq!(discord_api_url().as_deref(), Some("http://127.0.0.1:9/api"));
    clear();
}

#[test]
fn ipc_dirs_follow_runtime_then_temp_vars() {
    let vars = [("XDG_RUNTIME_DIR", "/run/user/1000"), ("TMP", "/var/tmp"), ("TEMP", "")];
    let dirs = ipc_dirs_from(|var| {
        vars.iter().find(|(name, _)| *name == var).map(|(_, value)| OsString::from(value))
    });
    assert_eq!(
        dirs,
        vec![PathBuf::from("/run/user/1000"), PathBuf::from("/var/tmp"), PathBuf::from("/tmp")]
    );
}

#[test]
fn ipc_dirs_fall_back_to_tmp_once() {
    assert_eq!(ipc_dirs_from(|_| None), vec![PathBuf::from("/tmp")]);
    let dirs = ipc_dirs_from(|var| (var == "TMPDIR").then(|| OsString::from("/tmp")));
    assert_eq!(dirs, vec![PathBuf::from("/tmp")]);
}
