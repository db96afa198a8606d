// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity, kind, and lifecycle status.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a submitted job.
    ///
    /// Assigned by the scheduler on submit and carried on every event the
    /// job emits.
    pub struct JobId("job-");
}

/// How the scheduler treats a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// One-shot; waits its turn in the FIFO queue.
    Transient,
    /// Runs for the process lifetime, outside the queue.
    Permanent,
}

impl JobKind {
    pub fn is_permanent(self) -> bool {
        matches!(self, JobKind::Permanent)
    }
}

crate::simple_display! {
    JobKind {
        Transient => "transient",
        Permanent => "permanent",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    /// Carries the error detail reported to the observer.
    Failed(String),
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Failed(_))
    }
}

crate::simple_display! {
    JobStatus {
        Queued => "queued",
        Running => "running",
        Finished => "finished",
        Failed(..) => "failed",
    }
}

/// Point-in-time view of a job for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: JobId,
    pub name: String,
    pub kind: JobKind,
    pub status: JobStatus,
    /// Always 0 for permanent jobs.
    pub last_progress: u8,
    pub last_message: String,
}

impl JobSnapshot {
    pub fn new(id: JobId, name: impl Into<String>, kind: JobKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            status: JobStatus::Queued,
            last_progress: 0,
            last_message: String::new(),
        }
    }
}

/// Clamp a raw percentage into `0..=100`.
pub fn clamp_progress(percent: i64) -> u8 {
    percent.clamp(0, 100) as u8
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
