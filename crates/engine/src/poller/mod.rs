// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence polling engine.
//!
//! A permanent job that, once per cycle, asks the candidate source about
//! every tracked identity, picks one winner by priority, and keeps the
//! presence sink in sync with it. While nothing is found the cycle interval
//! backs off; it snaps back as soon as something shows up.

mod render;
mod resolve;
mod settings;
mod state;

pub use render::{render, MIN_TEXT_CHARS, NO_IMAGE, NO_PLAYER_NAME};
pub use resolve::{pick_winner, Matched};
pub use settings::{default_statuses, Branding, PollSettings, SettingsHandle, TieBreak};
pub use state::{BackoffChange, PollerState, Step, Transition};

use crate::job::{Job, JobContext, JobError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use wr_adapters::{
    CandidateSource, EnrichmentOutcome, EnrichmentSource, PresenceSink, SourceOutcome,
};
use wr_core::{
    ActivityPayload, Clock, Enrichment, JobKind, LogLevel, PresenceMode, PresenceState,
};

pub const POLLER_NAME: &str = "presence poller";

/// Published after every cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PollerStatus {
    pub mode: PresenceMode,
    pub presence: Option<PresenceState>,
    /// Last payload the sink accepted; `None` while cleared.
    pub shown: Option<ActivityPayload>,
    pub backoff_extra: Duration,
    pub next_poll_in: Duration,
    pub cycles: u64,
}

pub struct PresencePoller<S, E, P, C> {
    source: S,
    enrichment: E,
    sink: P,
    clock: C,
    settings: SettingsHandle,
    status: watch::Sender<PollerStatus>,
}

impl<S, E, P, C> PresencePoller<S, E, P, C>
where
    S: CandidateSource,
    E: EnrichmentSource,
    P: PresenceSink,
    C: Clock,
{
    pub fn new(source: S, enrichment: E, sink: P, clock: C, settings: SettingsHandle) -> Self {
        let (status, _) = watch::channel(PollerStatus::default());
        Self { source, enrichment, sink, clock, settings, status }
    }

    /// Cycle-by-cycle view of the poller; valid before and after submit.
    pub fn status(&self) -> watch::Receiver<PollerStatus> {
        self.status.subscribe()
    }

    async fn poll_forever(mut self, ctx: JobContext) -> Result<(), JobError> {
        self.sink
            .connect()
            .await
            .map_err(|e| JobError::Fatal(format!("presence client unavailable: {e}")))?;
        ctx.info("Connected to presence client");

        let mut state = PollerState::new(&self.settings.snapshot());
        let mut shown: Option<ActivityPayload> = None;
        let mut cycles = 0u64;

        loop {
            let settings = self.settings.snapshot();
            state.reconfigure(&settings);
            cycles += 1;

            if settings.disabled {
                if state.disable() {
                    ctx.info("Presence disabled");
                }
                self.clear(&ctx).await;
                shown = None;
                self.publish(&state, &shown, settings.disabled_poll_interval, cycles);
                tokio::time::sleep(settings.disabled_poll_interval).await;
                continue;
            }

            let winner = find_winner(&self.source, &settings, &ctx).await;
            let step = state.observe(winner.map(|m| m.candidate), self.clock.epoch_ms());
            log_step(&ctx, &step, &state, &settings);

            match state.presence() {
                None => {
                    self.clear(&ctx).await;
                    shown = None;
                }
                Some(presence) => {
                    let room = enrich(&self.enrichment, presence, &settings, &ctx).await;
                    let payload = render(presence, room.as_ref(), &settings);
                    if shown.as_ref() != Some(&payload) {
                        match self.sink.set_activity(&payload).await {
                            Ok(()) => shown = Some(payload),
                            Err(e) => ctx.warn(format!("Failed to update presence: {e}")),
                        }
                    }
                }
            }

            let interval = state.backoff().interval();
            self.publish(&state, &shown, interval, cycles);
            tokio::time::sleep(interval).await;
        }
    }

    async fn clear(&mut self, ctx: &JobContext) {
        if let Err(e) = self.sink.clear_activity().await {
            ctx.warn(format!("Failed to clear presence: {e}"));
        }
    }

    fn publish(
        &self,
        state: &PollerState,
        shown: &Option<ActivityPayload>,
        next_poll_in: Duration,
        cycles: u64,
    ) {
        self.status.send_replace(PollerStatus {
            mode: state.mode(),
            presence: state.presence().cloned(),
            shown: shown.clone(),
            backoff_extra: state.backoff().current_extra(),
            next_poll_in,
            cycles,
        });
    }
}

#[async_trait]
impl<S, E, P, C> Job for PresencePoller<S, E, P, C>
where
    S: CandidateSource,
    E: EnrichmentSource,
    P: PresenceSink,
    C: Clock,
{
    fn name(&self) -> String {
        POLLER_NAME.to_string()
    }

    fn kind(&self) -> JobKind {
        JobKind::Permanent
    }

    async fn run(self: Box<Self>, ctx: JobContext) -> Result<(), JobError> {
        (*self).poll_forever(ctx).await
    }
}

/// Query every identity and pick the winner. Lookup problems skip the
/// identity for this cycle.
async fn find_winner<S: CandidateSource>(
    source: &S,
    settings: &PollSettings,
    ctx: &JobContext,
) -> Option<Matched> {
    let mut matches = Vec::new();
    for identity in &settings.identities {
        let priority = match identity.validate() {
            Ok(priority) => priority,
            Err(issue) => {
                ctx.warn(format!(
                    "Skipping {}/{}: {issue}",
                    identity.identity_key, identity.correlation_code
                ));
                continue;
            }
        };

        let list = match source.fetch_candidates(&identity.identity_key).await {
            Ok(SourceOutcome::Found(list)) => list,
            Ok(SourceOutcome::NotFound) => {
                ctx.warn(format!("Could not find game: {}", identity.identity_key));
                continue;
            }
            Ok(SourceOutcome::Empty) => {
                ctx.log(
                    LogLevel::Debug,
                    format!("No players online for game: {}", identity.identity_key),
                );
                continue;
            }
            Err(e) => {
                ctx.warn(format!("Lookup failed for {}: {e}", identity.identity_key));
                continue;
            }
        };

        if let Some(candidate) = list.find(&identity.correlation_code) {
            matches.push(Matched { priority, candidate: candidate.clone() });
        }
    }
    pick_winner(matches, settings.tie_break)
}

async fn enrich<E: EnrichmentSource>(
    source: &E,
    presence: &PresenceState,
    settings: &PollSettings,
    ctx: &JobContext,
) -> Option<Enrichment> {
    let candidate = &presence.candidate;
    if !settings.wants_enrichment(&candidate.identity_key) {
        return None;
    }
    match source.fetch_enrichment(candidate.lookup_key()).await {
        Ok(EnrichmentOutcome::Active(room)) => Some(room),
        Ok(EnrichmentOutcome::Ended) => None,
        Err(e) => {
            ctx.warn(format!("Room lookup failed for {}: {e}", candidate.identity_key));
            None
        }
    }
}

fn log_step(ctx: &JobContext, step: &Step, state: &PollerState, settings: &PollSettings) {
    let game = state.presence().map(|p| p.candidate.game_name.as_str()).unwrap_or_default();
    match &step.transition {
        Transition::Started => ctx.info(format!("Now playing: {game}")),
        Transition::Switched { previous_game } => {
            ctx.info(format!("Stopped playing: {previous_game}"));
            ctx.info(format!("Now playing: {game}"));
        }
        Transition::StatusChanged => {
            let status = state
                .presence()
                .map(|p| settings.status_text(&p.candidate.status_code).to_string())
                .unwrap_or_default();
            ctx.info(format!("Status changed: {status}"));
        }
        Transition::Stopped { game_name } => ctx.info(format!("Stopped playing: {game_name}")),
        Transition::Unchanged | Transition::StillIdle => {}
    }

    let backoff = state.backoff();
    match step.backoff {
        BackoffChange::Advanced => ctx.info(format!(
            "Backing off poll interval by {:?}. Now set to {:?}",
            settings.backoff_step,
            backoff.interval()
        )),
        BackoffChange::Reset => {
            ctx.info(format!("Reverting poll interval back to {:?}", settings.min_delay))
        }
        BackoffChange::Unchanged => {}
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
