// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::ConfigError;
use serial_test::serial;
use std::time::Duration;
use tempfile::tempdir;
use wr_adapters::{FakeErrorReporter, FakePresenceSink};
use wr_engine::POLLER_NAME;

/// Nothing listens on the discard port, so every HTTP job fails fast.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn test_config(dir: &std::path::Path) -> Config {
    Config::under(dir.join("state"), dir.join("config/config.toml"))
}

#[tokio::test]
async fn startup_lock_failed_does_not_remove_lock_file() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(&config.state_dir).unwrap();

    // Simulate a running daemon holding the lock
    let held = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)
        .unwrap();
    held.try_lock_exclusive().unwrap();
    std::fs::write(&config.lock_path, b"4242\n").unwrap();

    let err = startup(&config).await.err().unwrap();
    assert!(matches!(err, LifecycleError::LockFailed(_)), "got {err}");
    assert_eq!(std::fs::read_to_string(&config.lock_path).unwrap(), "4242\n");
}

#[tokio::test]
async fn missing_client_id_fails_and_releases_lock() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let err = startup(&config).await.err().unwrap();
    assert!(
        matches!(err, LifecycleError::Config(ConfigError::MissingClientId)),
        "got {err}"
    );
    assert!(!config.lock_path.exists());
    assert!(config.cache_dir.is_dir());
}

#[tokio::test]
async fn invalid_config_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(config.config_path.parent().unwrap()).unwrap();
    std::fs::write(&config.config_path, "[rpc]\nmin_delay_secs = \"soon\"").unwrap();

    let err = startup(&config).await.err().unwrap();
    assert!(err.to_string().contains("config.toml"), "got {err}");
    assert!(!config.lock_path.exists());
}

fn with_client_id(dir: &std::path::Path) -> Config {
    let config = test_config(dir);
    std::fs::create_dir_all(config.config_path.parent().unwrap()).unwrap();
    std::fs::write(&config.config_path, "[rpc]\nclient_id = \"1234\"\n").unwrap();
    std::env::set_var("WR_WIIMMFI_URL", UNREACHABLE);
    std::env::set_var("WR_DISCORD_API_URL", UNREACHABLE);
    config
}

fn clear_env() {
    std::env::remove_var("WR_WIIMMFI_URL");
    std::env::remove_var("WR_DISCORD_API_URL");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn refused_presence_client_stops_the_daemon() {
    let dir = tempdir().unwrap();
    let config = with_client_id(dir.path());
    let reporter = FakeErrorReporter::new();

    let mut handed = None;
    let mut daemon = startup_with(&config, reporter.clone(), |discord| {
        handed = Some(discord);
        FakePresenceSink::refusing()
    })
    .await
    .unwrap();
    let handed = handed.unwrap();
    assert_eq!(handed.client_id, "1234");
    assert_eq!(handed.api_base, UNREACHABLE);
    assert!(config.lock_path.exists());

    let detail = tokio::time::timeout(Duration::from_secs(10), daemon.poller_failed())
        .await
        .expect("poller failure was never surfaced");
    assert!(detail.contains("presence client unavailable"), "{detail}");
    assert!(reporter.calls().iter().any(|c| c.job_name == POLLER_NAME));

    daemon.shutdown().await;
    assert!(!config.lock_path.exists());

    // The lock is free for the next daemon
    let next = startup_with(&config, FakeErrorReporter::new(), |_| FakePresenceSink::new()).await;
    clear_env();
    next.unwrap().shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn healthy_poller_keeps_the_daemon_running() {
    let dir = tempdir().unwrap();
    let config = with_client_id(dir.path());
    let sink = FakePresenceSink::new();

    let result = startup_with(&config, FakeErrorReporter::new(), |_| sink.clone()).await;
    clear_env();
    let mut daemon = result.unwrap();

    let waited = tokio::time::timeout(Duration::from_millis(300), daemon.poller_failed()).await;
    assert!(waited.is_err(), "poller reported failure: {waited:?}");
    assert!(sink.calls().contains(&wr_adapters::SinkCall::Connect));
    daemon.shutdown().await;
}
