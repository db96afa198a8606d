// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unit of work the scheduler runs.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use wr_core::{clamp_progress, JobEvent, JobEventKind, JobId, JobKind, LogLevel};

use crate::scheduler::Command;

/// Why a job body stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("{0}")]
    Failed(String),
    /// The job cannot do anything useful until restarted (e.g. the presence
    /// client refused the connection).
    #[error("fatal: {0}")]
    Fatal(String),
}

/// Asynchronous work with a name and a kind.
///
/// Transient jobs run once, in submission order, one at a time.
/// Permanent jobs start immediately and usually never return.
#[async_trait]
pub trait Job: Send + 'static {
    fn name(&self) -> String;

    fn kind(&self) -> JobKind;

    /// Status line shown while the job runs.
    fn friendly_progress(&self) -> Option<String> {
        None
    }

    async fn run(self: Box<Self>, ctx: JobContext) -> Result<(), JobError>;
}

/// Handle a running job uses to report back.
///
/// Everything is sent on the scheduler's single channel, so events from one
/// job arrive in the order they were emitted.
#[derive(Clone)]
pub struct JobContext {
    id: JobId,
    name: String,
    kind: JobKind,
    tx: mpsc::UnboundedSender<Command>,
}

impl JobContext {
    pub(crate) fn new(
        id: JobId,
        name: String,
        kind: JobKind,
        tx: mpsc::UnboundedSender<Command>,
    ) -> Self {
        Self { id, name, kind, tx }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Percent complete, clamped to 0..=100. Ignored for permanent jobs.
    pub fn progress(&self, percent: i64) {
        if self.kind.is_permanent() {
            return;
        }
        self.emit(JobEventKind::Progress { percent: clamp_progress(percent) });
    }

    pub fn message(&self, text: impl Into<String>) {
        self.emit(JobEventKind::Message { text: text.into() });
    }

    pub fn log(&self, level: LogLevel, text: impl Into<String>) {
        self.emit(JobEventKind::Log { level, text: text.into() });
    }

    pub fn info(&self, text: impl Into<String>) {
        self.log(LogLevel::Info, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.log(LogLevel::Warn, text);
    }

    pub fn data(&self, payload: serde_json::Value) {
        self.emit(JobEventKind::Data { payload });
    }

    fn emit(&self, kind: JobEventKind) {
        let event = JobEvent {
            job_id: self.id.clone(),
            job_name: self.name.clone(),
            job_kind: self.kind,
            kind,
        };
        // Closed only after scheduler shutdown, when nobody is listening.
        let _ = self.tx.send(Command::Event(event));
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
