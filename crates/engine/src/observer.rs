// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Passive consumer of scheduler activity.

use wr_core::{JobEvent, JobEventKind, LogLevel};

/// Status line sent when the transient queue drains.
pub const IDLE_STATUS: &str = "No operations.";

/// Receives job events in per-job order plus scheduler status lines.
///
/// Called from the coordinator task; implementations must not block.
pub trait StatusObserver: Send + Sync + 'static {
    fn on_event(&self, event: &JobEvent);

    /// Human readable scheduler status ("Downloading games list", [`IDLE_STATUS`]).
    fn on_status(&self, text: &str);
}

/// Re-emits job activity through `tracing`, at the job's own level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn on_event(&self, event: &JobEvent) {
        let job = event.job_name.as_str();
        let id = event.job_id.short(8);
        match &event.kind {
            JobEventKind::Started => tracing::debug!(job, id, "job started"),
            JobEventKind::Progress { percent } => tracing::debug!(job, id, percent, "progress"),
            JobEventKind::Message { text } => tracing::info!(job, id, "{text}"),
            JobEventKind::Log { level, text } => match level {
                LogLevel::Debug => tracing::debug!(job, "{text}"),
                LogLevel::Info => tracing::info!(job, "{text}"),
                LogLevel::Warn => tracing::warn!(job, "{text}"),
                LogLevel::Error => tracing::error!(job, "{text}"),
            },
            JobEventKind::Data { .. } => tracing::debug!(job, id, "job produced data"),
            JobEventKind::Finished => tracing::info!(job, id, "job finished"),
            JobEventKind::Failed { detail } => tracing::error!(job, id, %detail, "job failed"),
        }
    }

    fn on_status(&self, text: &str) {
        tracing::info!(status = text, "scheduler");
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::StatusObserver;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use wr_core::{JobEvent, JobEventKind};

    #[derive(Default)]
    struct Recorded {
        events: Vec<JobEvent>,
        statuses: Vec<String>,
    }

    /// Keeps everything it observes; clones share the record.
    #[derive(Clone, Default)]
    pub struct RecordingObserver {
        inner: Arc<Mutex<Recorded>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<JobEvent> {
            self.inner.lock().events.clone()
        }

        /// `(job name, event tag)` pairs, handy for order assertions.
        pub fn timeline(&self) -> Vec<(String, &'static str)> {
            self.inner.lock().events.iter().map(|e| (e.job_name.clone(), e.kind.name())).collect()
        }

        pub fn statuses(&self) -> Vec<String> {
            self.inner.lock().statuses.clone()
        }

        /// Text of every log event for `job`.
        pub fn logs_for(&self, job: &str) -> Vec<String> {
            self.inner
                .lock()
                .events
                .iter()
                .filter(|e| e.job_name == job)
                .filter_map(|e| match &e.kind {
                    JobEventKind::Log { text, .. } => Some(text.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl StatusObserver for RecordingObserver {
        fn on_event(&self, event: &JobEvent) {
            self.inner.lock().events.push(event.clone());
        }

        fn on_status(&self, text: &str) {
            self.inner.lock().statuses.push(text.to_string());
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::RecordingObserver;
