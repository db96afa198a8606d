// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Winner selection among the candidates matched in one cycle.

use super::settings::TieBreak;
use wr_core::{Candidate, Priority};

/// A tracked identity that was found this cycle.
#[derive(Debug, Clone)]
pub struct Matched {
    pub priority: Priority,
    pub candidate: Candidate,
}

/// Pick the single displayed candidate.
///
/// Matches are visited in identity order. A smaller priority value always
/// wins; equal values go to the later match under [`TieBreak::LastWins`]
/// and stay with the earlier one under [`TieBreak::FirstWins`].
pub fn pick_winner(
    matches: impl IntoIterator<Item = Matched>,
    tie_break: TieBreak,
) -> Option<Matched> {
    let mut winner: Option<Matched> = None;
    for next in matches {
        let replace = match &winner {
            None => true,
            Some(current) => match tie_break {
                TieBreak::LastWins => current.priority >= next.priority,
                TieBreak::FirstWins => current.priority > next.priority,
            },
        };
        if replace {
            winner = Some(next);
        }
    }
    winner
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
