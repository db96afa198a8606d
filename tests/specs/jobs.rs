// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background job specs
//!
//! The games list refresh shares the scheduler with the presence poller.

use crate::prelude::*;
use tempfile::tempdir;
use wr_engine::jobs::load_cache;
use wr_engine::GAME_LIST_FILE;

const REFRESH: &str = "game list refresh";

fn games() -> Vec<GameEntry> {
    vec![
        GameEntry { id: "RMCJ".to_string(), name: "Mario Kart Wii".to_string() },
        GameEntry { id: "RSBE".to_string(), name: "Super Smash Bros. Brawl".to_string() },
    ]
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_is_escalated_while_the_poller_keeps_running() {
    let mut w = World::start(vec![identity("K", "X", 1)]);
    w.online(candidate("K", "X"));
    let dir = tempdir().unwrap();

    let catalog = FakeGameCatalog::failing(SourceError::Status(503));
    w.scheduler.submit(GameListRefresh::new(catalog, w.clock.clone(), dir.path()));
    w.scheduler.wait_idle().await;

    let calls = w.reporter.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].job_name, REFRESH);
    assert!(calls[0].detail.contains("could not download games list"), "{}", calls[0].detail);

    // The poller is unaffected
    let status = w.cycle(2).await;
    assert_eq!(status.mode, PresenceMode::Active);
    let poller = w.scheduler.jobs().into_iter().find(|j| j.name == POLLER_NAME).unwrap();
    assert_eq!(poller.status, JobStatus::Running);
    assert_eq!(w.scheduler.stats().permanent, 1);
    assert_eq!(w.scheduler.stats().queued, 0);
}

#[tokio::test(start_paused = true)]
async fn refresh_downloads_once_then_trusts_the_cache() {
    let w = World::start(Vec::new());
    let dir = tempdir().unwrap();
    let catalog = FakeGameCatalog::new(games());

    w.scheduler.submit(GameListRefresh::new(catalog.clone(), w.clock.clone(), dir.path()));
    w.scheduler.submit(GameListRefresh::new(catalog.clone(), w.clock.clone(), dir.path()));
    w.scheduler.wait_idle().await;

    assert_eq!(catalog.fetches(), 1);
    let cache = load_cache(&dir.path().join(GAME_LIST_FILE)).await.unwrap();
    assert_eq!(cache.name_of("rmcj"), Some("Mario Kart Wii"));
    assert_eq!(cache.updated_ms, w.clock.epoch_ms());

    let messages = w.messages_of(REFRESH);
    assert_eq!(messages.first().map(String::as_str), Some("Downloading games list"));
    assert_eq!(messages.last().map(String::as_str), Some("Game list up to date"));
    assert!(w.reporter.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn queued_refreshes_run_one_at_a_time() {
    let w = World::start(Vec::new());
    let dir = tempdir().unwrap();
    let catalog = FakeGameCatalog::new(games());

    for _ in 0..3 {
        w.scheduler.submit(GameListRefresh::new(catalog.clone(), w.clock.clone(), dir.path()));
    }
    assert_eq!(w.scheduler.stats().queued, 3);
    w.scheduler.wait_idle().await;

    let lifecycle: Vec<&str> = w
        .observer
        .timeline()
        .into_iter()
        .filter(|(job, _)| job == REFRESH)
        .map(|(_, event)| event)
        .filter(|event| matches!(*event, "started" | "finished" | "failed"))
        .collect();
    assert_eq!(
        lifecycle,
        vec!["started", "finished", "started", "finished", "started", "finished"]
    );
    assert_eq!(w.scheduler.stats().peak_queued, 3);
}
