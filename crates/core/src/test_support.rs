// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Candidate, CandidateList, TrackedIdentity};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::Priority;
    use proptest::prelude::*;

    pub fn arb_priority() -> impl Strategy<Value = Priority> {
        (1u8..=5).prop_filter_map("in range", |raw| Priority::try_from(raw).ok())
    }

    /// Priorities for a handful of identities, in configuration order.
    pub fn arb_priorities() -> impl Strategy<Value = Vec<Priority>> {
        proptest::collection::vec(arb_priority(), 0..8)
    }
}

// ── Factories ───────────────────────────────────────────────────────────

pub fn identity(key: &str, code: &str, priority: u8) -> TrackedIdentity {
    TrackedIdentity::new(key, code, priority)
}

/// Candidate observed for `key` with correlation code `code`.
pub fn candidate(key: &str, code: &str) -> Candidate {
    Candidate::builder()
        .identity_key(key)
        .game_name(format!("Game {key}"))
        .correlation_code(code)
        .display_name_1(format!("Player {code}"))
        .build()
}

pub fn candidate_with_status(key: &str, code: &str, status: &str) -> Candidate {
    let mut c = candidate(key, code);
    c.status_code = status.to_string();
    c
}

/// A single-candidate list, as the source would return for one online player.
pub fn single_list(candidate: Candidate) -> CandidateList {
    CandidateList::new(candidate.game_name.clone(), vec![candidate])
}
