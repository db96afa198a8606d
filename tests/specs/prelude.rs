// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the workspace specs.

pub use std::time::Duration;

pub use wr_adapters::{
    FakeCandidateSource, FakeEnrichmentSource, FakeErrorReporter, FakeGameCatalog,
    FakePresenceSink, SinkCall, SourceError,
};
pub use wr_core::test_support::{candidate, candidate_with_status, identity, single_list};
pub use wr_core::{
    Candidate, Clock, Enrichment, FakeClock, GameEntry, JobEventKind, JobStatus, PresenceMode,
    TrackedIdentity,
};
pub use wr_engine::{
    GameListRefresh, PollSettings, PollerStatus, PresencePoller, RecordingObserver, Scheduler,
    SettingsHandle, POLLER_NAME,
};

use tokio::sync::watch;

pub const SECOND: Duration = Duration::from_secs(1);

/// A scheduler running one presence poller against fake adapters.
pub struct World {
    pub scheduler: Scheduler,
    pub observer: RecordingObserver,
    pub reporter: FakeErrorReporter,
    pub source: FakeCandidateSource,
    pub rooms: FakeEnrichmentSource,
    pub sink: FakePresenceSink,
    pub clock: FakeClock,
    pub settings: SettingsHandle,
    status: watch::Receiver<PollerStatus>,
}

impl World {
    /// Default timings: 15s base interval, 15s backoff step, 120s cap.
    pub fn start(identities: Vec<TrackedIdentity>) -> Self {
        let observer = RecordingObserver::new();
        let reporter = FakeErrorReporter::new();
        let scheduler = Scheduler::start(observer.clone(), reporter.clone());

        let source = FakeCandidateSource::new();
        let rooms = FakeEnrichmentSource::new();
        let sink = FakePresenceSink::new();
        let clock = FakeClock::new();
        let settings = SettingsHandle::new(PollSettings { identities, ..PollSettings::default() });

        let poller = PresencePoller::new(
            source.clone(),
            rooms.clone(),
            sink.clone(),
            clock.clone(),
            settings.clone(),
        );
        let status = poller.status();
        scheduler.submit(poller);

        Self { scheduler, observer, reporter, source, rooms, sink, clock, settings, status }
    }

    /// Wait for cycle `n` to be published and its log lines relayed.
    pub async fn cycle(&mut self, n: u64) -> PollerStatus {
        let status = self.status.wait_for(|s| s.cycles >= n).await.unwrap().clone();
        tokio::time::sleep(Duration::from_millis(1)).await;
        status
    }

    pub fn online(&self, c: Candidate) {
        let key = c.identity_key.clone();
        self.source.set_found(&key, single_list(c));
    }

    pub fn poller_logs(&self) -> Vec<String> {
        self.observer.logs_for(POLLER_NAME)
    }

    /// Messages emitted by every job named `job`, in order.
    pub fn messages_of(&self, job: &str) -> Vec<String> {
        self.observer
            .events()
            .into_iter()
            .filter(|e| e.job_name == job)
            .filter_map(|e| match e.kind {
                JobEventKind::Message { text } => Some(text),
                _ => None,
            })
            .collect()
    }
}

pub fn code_of(status: &PollerStatus) -> Option<&str> {
    status.presence.as_ref().map(|p| p.candidate.correlation_code.as_str())
}
