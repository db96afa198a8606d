// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeSet;
use tempfile::tempdir;
use wr_engine::PollSettings;

#[test]
fn reload_replaces_changed_settings_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rpc]\nmin_delay_secs = 30\nmax_delay_secs = 300").unwrap();
    let settings = SettingsHandle::new(PollSettings::default());

    assert!(apply_reload(&path, &settings).unwrap());
    assert_eq!(settings.snapshot().min_delay, Duration::from_secs(30));
    assert!(!apply_reload(&path, &settings).unwrap());
}

#[test]
fn reload_keeps_fetched_art_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    let art = Some(BTreeSet::from(["rsbe".to_string()]));
    let settings =
        SettingsHandle::new(PollSettings { art_keys: art.clone(), ..PollSettings::default() });

    assert!(!apply_reload(&path, &settings).unwrap());
    assert_eq!(settings.snapshot().art_keys, art);

    std::fs::write(&path, "[rpc]\ndisabled = true").unwrap();
    assert!(apply_reload(&path, &settings).unwrap());
    let live = settings.snapshot();
    assert!(live.disabled);
    assert_eq!(live.art_keys, art);
}

#[test]
fn invalid_file_keeps_live_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rpc]\ndisabled = true").unwrap();
    let settings = SettingsHandle::new(PollSettings::default());
    apply_reload(&path, &settings).unwrap();

    std::fs::write(&path, "[rpc\ndisabled = false").unwrap();
    assert!(apply_reload(&path, &settings).is_err());
    assert!(settings.snapshot().disabled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn watcher_applies_edits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    let settings = SettingsHandle::new(PollSettings::default());

    let (_watcher, task) = watch_config(path.clone(), settings.clone()).unwrap();
    std::fs::write(&path, "[rpc]\ndisabled = true").unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(10), async {
        while !settings.snapshot().disabled {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    task.abort();
    assert!(seen.is_ok(), "watcher never applied the edit");
}
