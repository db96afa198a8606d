// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::observer::RecordingObserver;
use crate::poller::{render, PollSettings, NO_IMAGE};
use crate::scheduler::Scheduler;
use std::collections::BTreeSet;
use wr_adapters::{FakeArtCatalog, FakeErrorReporter, SourceError};
use wr_core::{Candidate, JobEventKind, PresenceState};

fn presence(key: &str) -> PresenceState {
    let candidate = Candidate::builder()
        .identity_key(key)
        .game_name("Some Game")
        .status_code("o")
        .display_name_1("Mario")
        .build();
    PresenceState::new(candidate, 1_000)
}

async fn run(
    catalog: FakeArtCatalog,
    settings: SettingsHandle,
) -> (RecordingObserver, FakeErrorReporter) {
    let observer = RecordingObserver::new();
    let reporter = FakeErrorReporter::new();
    let scheduler = Scheduler::start(observer.clone(), reporter.clone());
    scheduler.submit(GameArtRefresh::new(catalog, settings));
    scheduler.wait_idle().await;
    (observer, reporter)
}

#[tokio::test]
async fn fetched_names_are_stored_lowercase() {
    let settings = SettingsHandle::new(PollSettings::default());
    let catalog = FakeArtCatalog::new(["RSBE", "wiimmfi"]);
    let (observer, reporter) = run(catalog.clone(), settings.clone()).await;

    assert_eq!(catalog.fetches(), 1);
    assert_eq!(
        settings.snapshot().art_keys,
        Some(BTreeSet::from(["rsbe".to_string(), "wiimmfi".to_string()]))
    );
    assert!(reporter.calls().is_empty());
    assert!(observer.events().iter().any(|e| matches!(
        &e.kind,
        JobEventKind::Message { text } if text == "2 art keys loaded"
    )));
}

#[tokio::test]
async fn game_missing_from_fetched_list_shows_placeholder() {
    let settings = SettingsHandle::new(PollSettings::default());
    run(FakeArtCatalog::new(["RSBE"]), settings.clone()).await;

    let snapshot = settings.snapshot();
    assert_eq!(render(&presence("RMCJ"), None, &snapshot).large_image, NO_IMAGE);
    assert_eq!(render(&presence("RSBE"), None, &snapshot).large_image, "rsbe");
}

#[tokio::test]
async fn failed_fetch_warns_and_trusts_every_key() {
    let settings = SettingsHandle::new(PollSettings::default());
    let (observer, reporter) =
        run(FakeArtCatalog::failing(SourceError::Status(401)), settings.clone()).await;

    assert_eq!(settings.snapshot().art_keys, None);
    assert_eq!(render(&presence("RMCJ"), None, &settings.snapshot()).large_image, "rmcj");
    assert!(reporter.calls().is_empty());
    let logs = observer.logs_for("game art refresh");
    assert!(logs.iter().any(|l| l.starts_with("Could not fetch game art list")), "{logs:?}");
}
