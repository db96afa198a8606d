// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wr-engine: the job scheduler, the presence poller, and maintenance jobs

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod job;
pub mod jobs;
pub mod observer;
pub mod poller;
pub mod scheduler;

pub use job::{Job, JobContext, JobError};
pub use jobs::{GameArtRefresh, GameListRefresh, GAME_LIST_FILE, GAME_LIST_MAX_AGE};
pub use observer::{StatusObserver, TracingObserver, IDLE_STATUS};
pub use poller::{
    default_statuses, Branding, PollSettings, PollerStatus, PresencePoller, SettingsHandle,
    TieBreak, POLLER_NAME,
};
pub use scheduler::{QueueStats, Scheduler};

#[cfg(any(test, feature = "test-support"))]
pub use observer::RecordingObserver;
