// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job scheduler.
//!
//! Transient jobs wait in a FIFO and run one at a time. Permanent jobs start
//! on submit and run beside the queue. Each job body runs in its own task; a
//! supervisor task awaits its join handle so that an `Err` or a panic turns
//! into exactly one `Failed` event. A single coordinator task owns the queue,
//! relays events to the [`StatusObserver`] and escalates failures to the
//! [`ErrorReporter`].

mod coordinator;

use crate::job::Job;
use crate::observer::StatusObserver;
use coordinator::Coordinator;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use wr_adapters::ErrorReporter;
use wr_core::{JobEvent, JobId, JobKind, JobSnapshot};

/// Capacity of the event broadcast; slow subscribers see `Lagged`.
const EVENT_BUFFER: usize = 256;

/// Queue counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Transient jobs not yet finished, including the running one.
    pub queued: usize,
    /// Highest `queued` seen since start.
    pub peak_queued: usize,
    /// Registered permanent jobs.
    pub permanent: usize,
}

pub(crate) enum Command {
    Submit { id: JobId, job: Box<dyn Job> },
    Event(JobEvent),
    Exited { id: JobId, outcome: Result<(), String> },
    Shutdown,
}

/// State readable from any handle.
pub(crate) struct Shared {
    jobs: Mutex<Vec<JobSnapshot>>,
    stats: watch::Sender<QueueStats>,
}

impl Shared {
    pub(crate) fn update_job(&self, id: &JobId, f: impl FnOnce(&mut JobSnapshot)) {
        if let Some(job) = self.jobs.lock().iter_mut().find(|j| &j.id == id) {
            f(job);
        }
    }

    pub(crate) fn remove_job(&self, id: &JobId) {
        self.jobs.lock().retain(|j| &j.id != id);
    }

    pub(crate) fn dequeue(&self) {
        self.stats.send_modify(|s| s.queued = s.queued.saturating_sub(1));
    }
}

/// Cloneable handle to a running scheduler.
#[derive(Clone)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<Command>,
    shared: Arc<Shared>,
    events: broadcast::Sender<JobEvent>,
}

impl Scheduler {
    /// Spawn the coordinator. Must be called inside a tokio runtime.
    pub fn start<O, R>(observer: O, reporter: R) -> Self
    where
        O: StatusObserver,
        R: ErrorReporter,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (stats, _) = watch::channel(QueueStats::default());
        let shared = Arc::new(Shared { jobs: Mutex::new(Vec::new()), stats });

        let coordinator =
            Coordinator::new(rx, tx.clone(), Arc::clone(&shared), events.clone(), observer, reporter);
        tokio::spawn(coordinator.run());

        Self { tx, shared, events }
    }

    /// Register a job. Never blocks; returns the assigned id.
    pub fn submit<J: Job>(&self, job: J) -> JobId {
        let id = JobId::new();
        let name = job.name();
        let kind = job.kind();

        self.shared.jobs.lock().push(JobSnapshot::new(id.clone(), name.clone(), kind));
        self.shared.stats.send_modify(|s| match kind {
            JobKind::Transient => {
                s.queued += 1;
                s.peak_queued = s.peak_queued.max(s.queued);
            }
            JobKind::Permanent => s.permanent += 1,
        });
        tracing::debug!(job = %name, %id, %kind, "job submitted");

        if self.tx.send(Command::Submit { id: id.clone(), job: Box::new(job) }).is_err() {
            tracing::warn!(job = %name, "scheduler is shut down; job dropped");
        }
        id
    }

    pub fn stats(&self) -> QueueStats {
        *self.shared.stats.borrow()
    }

    /// Counter updates as they happen.
    pub fn watch_stats(&self) -> watch::Receiver<QueueStats> {
        self.shared.stats.subscribe()
    }

    /// Every job event, for consumers besides the status observer.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    /// Queued and running transient jobs plus every permanent job.
    pub fn jobs(&self) -> Vec<JobSnapshot> {
        self.shared.jobs.lock().clone()
    }

    pub fn job(&self, id: &JobId) -> Option<JobSnapshot> {
        self.shared.jobs.lock().iter().find(|j| &j.id == id).cloned()
    }

    /// Resolves once no transient job is queued or running.
    pub async fn wait_idle(&self) {
        let mut rx = self.shared.stats.subscribe();
        let _ = rx.wait_for(|s| s.queued == 0).await;
    }

    /// Abort every job and stop the coordinator.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown);
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
