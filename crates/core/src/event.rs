// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by running jobs.
//!
//! Every job has four outward streams (progress, message, log, data) plus
//! the lifecycle edges the scheduler derives from the job body's result.
//! Events of one job are delivered in emission order; there is no ordering
//! across jobs.

use crate::job::{JobId, JobKind};
use serde::{Deserialize, Serialize};

/// Severity of a job log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

crate::simple_display! {
    LogLevel {
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

/// Payload of a [`JobEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobEventKind {
    Started,
    Progress { percent: u8 },
    Message { text: String },
    Log { level: LogLevel, text: String },
    /// Opaque result for jobs that produce data; not interpreted by the scheduler.
    Data { payload: serde_json::Value },
    Finished,
    Failed { detail: String },
}

impl JobEventKind {
    /// Finished or Failed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobEventKind::Finished | JobEventKind::Failed { .. })
    }

    /// Tag used in logs and serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            JobEventKind::Started => "started",
            JobEventKind::Progress { .. } => "progress",
            JobEventKind::Message { .. } => "message",
            JobEventKind::Log { .. } => "log",
            JobEventKind::Data { .. } => "data",
            JobEventKind::Finished => "finished",
            JobEventKind::Failed { .. } => "failed",
        }
    }
}

/// An event tagged with the job that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    pub job_id: JobId,
    pub job_name: String,
    pub job_kind: JobKind,
    #[serde(flatten)]
    pub kind: JobEventKind,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
