// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Displayed presence: state, sink payload, and enrichment data.

use crate::candidate::Candidate;
use serde::{Deserialize, Serialize};

/// Mode of the presence poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceMode {
    /// Polling suspended, presence forced clear.
    Disabled,
    /// Nothing to show; backoff accumulates.
    #[default]
    Idle,
    /// A winner is displayed.
    Active,
}

crate::simple_display! {
    PresenceMode {
        Disabled => "disabled",
        Idle => "idle",
        Active => "active",
    }
}

/// The currently displayed activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceState {
    pub candidate: Candidate,
    /// Fixed when the correlation code first became active.
    pub started_at_ms: u64,
}

impl PresenceState {
    pub fn new(candidate: Candidate, started_at_ms: u64) -> Self {
        Self { candidate, started_at_ms }
    }

    /// Swap in a newer observation of the same entity, keeping the start time.
    pub fn refresh(&mut self, candidate: Candidate) {
        self.candidate = candidate;
    }
}

/// Extra detail from the secondary lookup for special-case identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub track_name: String,
    pub members: u32,
    pub capacity: u32,
    /// Replaces the displayed start time (race start).
    pub race_start_ms: Option<u64>,
}

/// What the presence sink is asked to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPayload {
    pub state: String,
    pub details: String,
    pub start_ms: u64,
    /// `(current, max)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<(u32, u32)>,
    pub large_image: String,
    pub large_text: String,
    pub small_image: String,
    pub small_text: String,
}

#[cfg(test)]
#[path = "presence_tests.rs"]
mod tests;
