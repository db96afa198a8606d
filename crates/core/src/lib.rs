// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wr-core: domain types shared by the presence poller and the job scheduler

pub mod macros;

pub mod backoff;
pub mod candidate;
pub mod clock;
pub mod event;
pub mod game;
pub mod id;
pub mod identity;
pub mod job;
pub mod presence;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use backoff::BackoffState;
#[cfg(any(test, feature = "test-support"))]
pub use candidate::CandidateBuilder;
pub use candidate::{Candidate, CandidateList};
pub use clock::{Clock, FakeClock, SystemClock};
pub use event::{JobEvent, JobEventKind, LogLevel};
pub use game::{GameEntry, GameListCache};
pub use identity::{IdentityIssue, Priority, TrackedIdentity};
pub use job::{clamp_progress, JobId, JobKind, JobSnapshot, JobStatus};
pub use presence::{ActivityPayload, Enrichment, PresenceMode, PresenceState};
