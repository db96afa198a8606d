// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracked identities: what the presence poller watches for.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display priority; 1 is the most important, 5 the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const LOWEST: Priority = Priority(5);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::HIGHEST
    }
}

impl TryFrom<u8> for Priority {
    type Error = IdentityIssue;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        if (Self::HIGHEST.0..=Self::LOWEST.0).contains(&raw) {
            Ok(Priority(raw))
        } else {
            Err(IdentityIssue::PriorityOutOfRange(raw))
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured entry that cannot be used this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityIssue {
    #[error("priority {0} is outside 1..=5")]
    PriorityOutOfRange(u8),
    #[error("identity key is empty")]
    EmptyKey,
    #[error("correlation code is empty")]
    EmptyCode,
}

/// A configured (identity key, correlation code, priority) entry as read
/// from configuration. Values are unchecked; see [`TrackedIdentity::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedIdentity {
    /// Game id the source is queried with (e.g. `RMCJ`).
    #[serde(rename = "key")]
    pub identity_key: String,
    /// Friend code that identifies our entry among the game's players.
    #[serde(rename = "code")]
    pub correlation_code: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    Priority::HIGHEST.get()
}

impl TrackedIdentity {
    pub fn new(key: impl Into<String>, code: impl Into<String>, priority: u8) -> Self {
        Self { identity_key: key.into(), correlation_code: code.into(), priority }
    }

    /// Checked priority, or the inconsistency that makes this entry unusable.
    pub fn validate(&self) -> Result<Priority, IdentityIssue> {
        if self.identity_key.trim().is_empty() {
            return Err(IdentityIssue::EmptyKey);
        }
        if self.correlation_code.trim().is_empty() {
            return Err(IdentityIssue::EmptyCode);
        }
        Priority::try_from(self.priority)
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
