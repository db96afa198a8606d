// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live poller configuration.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use wr_core::TrackedIdentity;

/// How equal priorities are broken when picking the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The later identity in configuration order wins (`>=`).
    #[default]
    LastWins,
    /// The earlier identity keeps the spot (`>`).
    FirstWins,
}

/// Small image and its tooltip, shown on every activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub small_image: String,
    pub small_text: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self { small_image: "wiimmfi".to_string(), small_text: "Wiimmfi".to_string() }
    }
}

/// Snapshot of everything the poller reads at the top of a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    /// Checked in this order; the order matters for tie-breaking.
    pub identities: Vec<TrackedIdentity>,
    pub disabled: bool,
    pub min_delay: Duration,
    pub backoff_step: Duration,
    pub max_delay: Duration,
    /// Sleep between cycles while disabled.
    pub disabled_poll_interval: Duration,
    pub tie_break: TieBreak,
    /// Status code to display text (`o` -> `Online`).
    pub statuses: HashMap<String, String>,
    /// Identity keys that get a secondary enrichment lookup.
    pub enrichment_keys: BTreeSet<String>,
    /// Lower-case keys that have uploaded art. `None` trusts every key.
    pub art_keys: Option<BTreeSet<String>>,
    pub branding: Branding,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            identities: Vec::new(),
            disabled: false,
            min_delay: Duration::from_secs(15),
            backoff_step: Duration::from_secs(15),
            max_delay: Duration::from_secs(120),
            disabled_poll_interval: Duration::from_secs(1),
            tie_break: TieBreak::default(),
            statuses: default_statuses(),
            enrichment_keys: BTreeSet::from(["RMCJ".to_string()]),
            art_keys: None,
            branding: Branding::default(),
        }
    }
}

/// Status texts used by Wiimmfi game pages.
pub fn default_statuses() -> HashMap<String, String> {
    [
        ("o", "Online"),
        ("h", "Hosting a room"),
        ("g", "In a room"),
        ("G", "In a room (guest)"),
        ("V", "Versus race"),
        ("B", "Battle"),
        ("C", "Competition"),
        ("b", "Hosting a battle"),
    ]
    .into_iter()
    .map(|(code, text)| (code.to_string(), text.to_string()))
    .collect()
}

impl PollSettings {
    /// Display text for a status code; unknown codes are shown raw.
    pub fn status_text<'a>(&'a self, code: &'a str) -> &'a str {
        self.statuses.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn wants_enrichment(&self, identity_key: &str) -> bool {
        self.enrichment_keys.contains(identity_key)
    }
}

/// Shared, replaceable settings. Readers clone a snapshot per cycle.
#[derive(Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<PollSettings>>,
}

impl SettingsHandle {
    pub fn new(settings: PollSettings) -> Self {
        Self { inner: Arc::new(RwLock::new(settings)) }
    }

    pub fn snapshot(&self) -> PollSettings {
        self.inner.read().clone()
    }

    pub fn replace(&self, settings: PollSettings) {
        *self.inner.write() = settings;
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.write().disabled = disabled;
    }

    pub fn update(&self, f: impl FnOnce(&mut PollSettings)) {
        f(&mut self.inner.write());
    }
}
