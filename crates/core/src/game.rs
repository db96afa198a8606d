// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Game catalog entries and their on-disk cache format.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub id: String,
    pub name: String,
}

/// Cached catalog, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameListCache {
    #[serde(default)]
    pub updated_ms: u64,
    #[serde(default)]
    pub games: Vec<GameEntry>,
}

impl GameListCache {
    /// Written within `max_age` of `now_ms`. Timestamps in the future count as fresh.
    pub fn is_fresh(&self, now_ms: u64, max_age: Duration) -> bool {
        now_ms.saturating_sub(self.updated_ms) < max_age.as_millis() as u64
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.games.iter().find(|g| g.id.eq_ignore_ascii_case(id)).map(|g| g.name.as_str())
    }
}
