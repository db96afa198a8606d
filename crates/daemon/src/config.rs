// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration file (`config.toml`).
//!
//! ```toml
//! [rpc]
//! client_id = "123456789012345678"
//! min_delay_secs = 15
//!
//! [presence]
//! enrich = ["RMCJ", "RMCE"]
//!
//! [statuses]
//! o = "Online"
//!
//! [[identity]]
//! key = "RMCJ"
//! code = "1234-5678-9012"
//! priority = 1
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use wr_core::TrackedIdentity;
use wr_engine::{default_statuses, Branding, PollSettings, TieBreak};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("rpc.client_id is not set")]
    MissingClientId,

    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },

    #[error("rpc.max_delay_secs ({max}) is below rpc.min_delay_secs ({min})")]
    DelayRange { min: u64, max: u64 },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub rpc: RpcSection,
    #[serde(default)]
    pub presence: PresenceSection,
    /// Extra or replacement status texts, merged over the built-in table.
    #[serde(default)]
    pub statuses: HashMap<String, String>,
    #[serde(default, rename = "identity")]
    pub identities: Vec<TrackedIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RpcSection {
    pub client_id: Option<String>,
    pub disabled: bool,
    pub min_delay_secs: u64,
    pub backoff_step_secs: u64,
    pub max_delay_secs: u64,
    pub disabled_poll_secs: u64,
    pub tie_break: TieBreak,
}

impl Default for RpcSection {
    fn default() -> Self {
        let defaults = PollSettings::default();
        Self {
            client_id: None,
            disabled: false,
            min_delay_secs: defaults.min_delay.as_secs(),
            backoff_step_secs: defaults.backoff_step.as_secs(),
            max_delay_secs: defaults.max_delay.as_secs(),
            disabled_poll_secs: defaults.disabled_poll_interval.as_secs(),
            tie_break: TieBreak::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresenceSection {
    pub small_image: String,
    pub small_text: String,
    /// Identity keys that get the room lookup.
    pub enrich: BTreeSet<String>,
}

impl Default for PresenceSection {
    fn default() -> Self {
        let defaults = PollSettings::default();
        Self {
            small_image: defaults.branding.small_image,
            small_text: defaults.branding.small_text,
            enrich: defaults.enrichment_keys,
        }
    }
}

impl ConfigFile {
    /// Read and parse `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Read(path.to_path_buf(), e)),
        }
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn client_id(&self) -> Result<&str, ConfigError> {
        self.rpc
            .client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingClientId)
    }

    /// Build the poller settings. Identity problems are left for the poller,
    /// which skips and reports them per cycle. `art_keys` stays unset until
    /// the game art job has fetched the application's asset list.
    pub fn poll_settings(&self) -> Result<PollSettings, ConfigError> {
        let rpc = &self.rpc;
        if rpc.min_delay_secs == 0 {
            return Err(ConfigError::ZeroDelay { field: "rpc.min_delay_secs" });
        }
        if rpc.disabled_poll_secs == 0 {
            return Err(ConfigError::ZeroDelay { field: "rpc.disabled_poll_secs" });
        }
        if rpc.max_delay_secs < rpc.min_delay_secs {
            return Err(ConfigError::DelayRange {
                min: rpc.min_delay_secs,
                max: rpc.max_delay_secs,
            });
        }

        let mut statuses = default_statuses();
        statuses.extend(self.statuses.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(PollSettings {
            identities: self.identities.clone(),
            disabled: rpc.disabled,
            min_delay: Duration::from_secs(rpc.min_delay_secs),
            backoff_step: Duration::from_secs(rpc.backoff_step_secs),
            max_delay: Duration::from_secs(rpc.max_delay_secs),
            disabled_poll_interval: Duration::from_secs(rpc.disabled_poll_secs),
            tie_break: rpc.tie_break,
            statuses,
            enrichment_keys: self.presence.enrich.clone(),
            art_keys: None,
            branding: Branding {
                small_image: self.presence.small_image.clone(),
                small_text: self.presence.small_text.clone(),
            },
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
