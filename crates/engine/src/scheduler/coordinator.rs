// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Command, Shared};
use crate::job::{Job, JobContext};
use crate::observer::{StatusObserver, IDLE_STATUS};
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::AbortHandle;
use wr_adapters::ErrorReporter;
use wr_core::{JobEvent, JobEventKind, JobId, JobKind, JobStatus};

struct Pending {
    id: JobId,
    job: Box<dyn Job>,
}

/// Bookkeeping for a job that has been spawned.
struct Live {
    name: String,
    kind: JobKind,
    abort: AbortHandle,
}

pub(super) struct Coordinator<O, R> {
    rx: mpsc::UnboundedReceiver<Command>,
    tx: mpsc::UnboundedSender<Command>,
    shared: Arc<Shared>,
    events: broadcast::Sender<JobEvent>,
    observer: O,
    reporter: R,
    queue: VecDeque<Pending>,
    running_transient: Option<JobId>,
    live: HashMap<JobId, Live>,
}

impl<O, R> Coordinator<O, R>
where
    O: StatusObserver,
    R: ErrorReporter,
{
    pub(super) fn new(
        rx: mpsc::UnboundedReceiver<Command>,
        tx: mpsc::UnboundedSender<Command>,
        shared: Arc<Shared>,
        events: broadcast::Sender<JobEvent>,
        observer: O,
        reporter: R,
    ) -> Self {
        Self {
            rx,
            tx,
            shared,
            events,
            observer,
            reporter,
            queue: VecDeque::new(),
            running_transient: None,
            live: HashMap::new(),
        }
    }

    pub(super) async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Submit { id, job } => self.on_submit(id, job),
                Command::Event(event) => self.on_job_event(event),
                Command::Exited { id, outcome } => self.on_exited(id, outcome).await,
                Command::Shutdown => break,
            }
        }

        for (id, live) in self.live.drain() {
            tracing::debug!(job = %live.name, %id, "aborting job");
            live.abort.abort();
        }
        tracing::info!("scheduler stopped");
    }

    fn on_submit(&mut self, id: JobId, job: Box<dyn Job>) {
        match job.kind() {
            JobKind::Permanent => self.spawn(id, job),
            JobKind::Transient => {
                self.queue.push_back(Pending { id, job });
                self.start_next();
            }
        }
    }

    fn start_next(&mut self) {
        if self.running_transient.is_some() {
            return;
        }
        let Some(Pending { id, job }) = self.queue.pop_front() else {
            return;
        };
        let status = job.friendly_progress().unwrap_or_else(|| job.name());
        self.running_transient = Some(id.clone());
        self.spawn(id, job);
        self.observer.on_status(&status);
    }

    fn spawn(&mut self, id: JobId, job: Box<dyn Job>) {
        let name = job.name();
        let kind = job.kind();
        let ctx = JobContext::new(id.clone(), name.clone(), kind, self.tx.clone());

        let handle = tokio::spawn(job.run(ctx));
        self.live.insert(
            id.clone(),
            Live { name: name.clone(), kind, abort: handle.abort_handle() },
        );
        self.shared.update_job(&id, |s| s.status = JobStatus::Running);
        self.publish(JobEvent {
            job_id: id.clone(),
            job_name: name,
            job_kind: kind,
            kind: JobEventKind::Started,
        });

        // Supervisor: the only place a job's end is observed.
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = match handle.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) if e.is_panic() => Err(panic_detail(e.into_panic())),
                Err(e) => Err(format!("job aborted: {e}")),
            };
            let _ = tx.send(Command::Exited { id, outcome });
        });
    }

    fn on_job_event(&mut self, event: JobEvent) {
        match &event.kind {
            JobEventKind::Progress { percent } => {
                let percent = *percent;
                self.shared.update_job(&event.job_id, |s| s.last_progress = percent);
            }
            JobEventKind::Message { text } => {
                self.shared.update_job(&event.job_id, |s| s.last_message = text.clone());
            }
            _ => {}
        }
        self.publish(event);
    }

    async fn on_exited(&mut self, id: JobId, outcome: Result<(), String>) {
        let Some(live) = self.live.remove(&id) else {
            return;
        };

        let (status, kind) = match outcome {
            Ok(()) => (JobStatus::Finished, JobEventKind::Finished),
            Err(detail) => {
                if let Err(e) = self.reporter.report(&live.name, &detail).await {
                    tracing::warn!(job = %live.name, error = %e, "failed to report job failure");
                }
                (JobStatus::Failed(detail.clone()), JobEventKind::Failed { detail })
            }
        };

        self.shared.update_job(&id, |s| s.status = status);
        self.publish(JobEvent {
            job_id: id.clone(),
            job_name: live.name,
            job_kind: live.kind,
            kind,
        });

        if live.kind.is_permanent() {
            return;
        }
        if self.running_transient.as_ref() == Some(&id) {
            self.running_transient = None;
            self.start_next();
            if self.running_transient.is_none() {
                self.observer.on_status(IDLE_STATUS);
            }
        }
        // Counters last, so `wait_idle` callers see every event first.
        self.shared.remove_job(&id);
        self.shared.dequeue();
    }

    fn publish(&self, event: JobEvent) {
        self.observer.on_event(&event);
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn panic_detail(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
