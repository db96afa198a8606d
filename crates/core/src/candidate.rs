// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Candidates: momentary observations returned by the candidate source.

use serde::{Deserialize, Serialize};

/// One observed entry for an identity key. Built fresh every poll cycle.
///
/// There is deliberately no `PartialEq`: "is this the same entity" is
/// [`Candidate::same_identity`] (correlation code only) and "did anything
/// shown change" is [`Candidate::status_changed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub identity_key: String,
    /// Human readable name of the identity (game title).
    pub game_name: String,
    pub correlation_code: String,
    pub status_code: String,
    pub display_name_1: String,
    pub display_name_2: Option<String>,
    /// Source-side session id (Wiimmfi pid), used for enrichment lookups.
    pub session_id: Option<String>,
    pub observed_at_ms: u64,
}

crate::builder! {
    pub struct CandidateBuilder => Candidate {
        into {
            identity_key: String = "RMCJ",
            game_name: String = "Mario Kart Wii",
            correlation_code: String = "0000-0000-0000",
            status_code: String = "o",
            display_name_1: String = "Player",
        }
        set {
            observed_at_ms: u64 = 1_700_000_000_000,
        }
        option {
            display_name_2: String = None,
            session_id: String = None,
        }
    }
}

impl Candidate {
    /// Identity equality: both observations describe the same entity.
    pub fn same_identity(&self, other: &Candidate) -> bool {
        self.correlation_code == other.correlation_code
    }

    /// Same entity, but something that is displayed differs.
    pub fn status_changed(&self, other: &Candidate) -> bool {
        self.same_identity(other)
            && (self.status_code != other.status_code
                || self.display_name_1 != other.display_name_1
                || self.display_name_2 != other.display_name_2)
    }

    /// Key for the secondary enrichment lookup: session id if known.
    pub fn lookup_key(&self) -> &str {
        self.session_id.as_deref().unwrap_or(&self.correlation_code)
    }

    /// Player names joined for display, if there are any.
    pub fn player_names(&self) -> Option<String> {
        let first = self.display_name_1.trim();
        if first.is_empty() {
            return None;
        }
        match self.display_name_2.as_deref().map(str::trim) {
            Some(second) if !second.is_empty() => Some(format!("{first} | {second}")),
            _ => Some(first.to_string()),
        }
    }
}

/// Everything the source returned for one identity key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateList {
    /// Name of the identity as reported by the source.
    pub display_name: String,
    pub candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn new(display_name: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self { display_name: display_name.into(), candidates }
    }

    /// The candidate whose correlation code matches.
    pub fn find(&self, correlation_code: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.correlation_code == correlation_code)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod tests;
