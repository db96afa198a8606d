// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-cycle presence state machine. No I/O; the job loop drives it.

use super::settings::PollSettings;
use wr_core::{BackoffState, Candidate, PresenceMode, PresenceState};

/// What a cycle did to the displayed presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Something is shown where nothing was.
    Started,
    /// A different entity replaced the shown one.
    Switched { previous_game: String },
    /// Same entity, different status or names; start time kept.
    StatusChanged,
    Unchanged,
    /// First idle cycle after being active.
    Stopped { game_name: String },
    /// Idle and was already idle.
    StillIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffChange {
    Unchanged,
    Advanced,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub transition: Transition,
    pub backoff: BackoffChange,
}

#[derive(Debug, Clone)]
pub struct PollerState {
    mode: PresenceMode,
    presence: Option<PresenceState>,
    backoff: BackoffState,
}

impl PollerState {
    pub fn new(settings: &PollSettings) -> Self {
        Self {
            mode: PresenceMode::Idle,
            presence: None,
            backoff: BackoffState::new(
                settings.min_delay,
                settings.backoff_step,
                settings.max_delay,
            ),
        }
    }

    pub fn mode(&self) -> PresenceMode {
        self.mode
    }

    pub fn presence(&self) -> Option<&PresenceState> {
        self.presence.as_ref()
    }

    pub fn backoff(&self) -> &BackoffState {
        &self.backoff
    }

    /// Pick up interval changes from a fresh settings snapshot.
    pub fn reconfigure(&mut self, settings: &PollSettings) {
        self.backoff.reconfigure(settings.min_delay, settings.backoff_step, settings.max_delay);
    }

    /// Enter `Disabled`, forgetting the shown presence. Returns true on the
    /// cycle the mode changes.
    pub fn disable(&mut self) -> bool {
        self.presence = None;
        let changed = self.mode != PresenceMode::Disabled;
        self.mode = PresenceMode::Disabled;
        changed
    }

    /// Apply this cycle's winner (or its absence).
    pub fn observe(&mut self, winner: Option<Candidate>, now_ms: u64) -> Step {
        match winner {
            None => self.go_idle(),
            Some(candidate) => self.show(candidate, now_ms),
        }
    }

    fn go_idle(&mut self) -> Step {
        self.mode = PresenceMode::Idle;
        let transition = match self.presence.take() {
            Some(shown) => Transition::Stopped { game_name: shown.candidate.game_name },
            None => Transition::StillIdle,
        };
        let backoff =
            if self.backoff.advance() { BackoffChange::Advanced } else { BackoffChange::Unchanged };
        Step { transition, backoff }
    }

    fn show(&mut self, candidate: Candidate, now_ms: u64) -> Step {
        self.mode = PresenceMode::Active;
        let backoff =
            if self.backoff.reset() { BackoffChange::Reset } else { BackoffChange::Unchanged };

        let transition = match self.presence.as_mut() {
            Some(shown) if shown.candidate.same_identity(&candidate) => {
                let changed = shown.candidate.status_changed(&candidate);
                shown.refresh(candidate);
                if changed {
                    Transition::StatusChanged
                } else {
                    Transition::Unchanged
                }
            }
            Some(shown) => {
                let previous_game = shown.candidate.game_name.clone();
                *shown = PresenceState::new(candidate, now_ms);
                Transition::Switched { previous_game }
            }
            None => {
                self.presence = Some(PresenceState::new(candidate, now_ms));
                Transition::Started
            }
        };
        Step { transition, backoff }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
