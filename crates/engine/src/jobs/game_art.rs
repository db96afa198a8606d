// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads which games have cover art uploaded for the presence application.

use crate::job::{Job, JobContext, JobError};
use crate::poller::SettingsHandle;
use async_trait::async_trait;
use std::collections::BTreeSet;
use wr_adapters::ArtCatalog;
use wr_core::JobKind;

/// Fetches the asset list once and stores the lower-cased names in the
/// live settings. A failed fetch leaves `art_keys` unset, so every game
/// keeps its own key as the large image.
pub struct GameArtRefresh<A> {
    catalog: A,
    settings: SettingsHandle,
}

impl<A: ArtCatalog> GameArtRefresh<A> {
    pub fn new(catalog: A, settings: SettingsHandle) -> Self {
        Self { catalog, settings }
    }
}

#[async_trait]
impl<A: ArtCatalog> Job for GameArtRefresh<A> {
    fn name(&self) -> String {
        "game art refresh".to_string()
    }

    fn kind(&self) -> JobKind {
        JobKind::Transient
    }

    fn friendly_progress(&self) -> Option<String> {
        Some("Checking game art".to_string())
    }

    async fn run(self: Box<Self>, ctx: JobContext) -> Result<(), JobError> {
        ctx.progress(0);
        let keys = match self.catalog.fetch_art_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                ctx.warn(format!("Could not fetch game art list: {e}"));
                ctx.progress(100);
                return Ok(());
            }
        };

        let keys: BTreeSet<String> = keys.iter().map(|k| k.to_lowercase()).collect();
        let count = keys.len();
        self.settings.update(|s| s.art_keys = Some(keys));
        ctx.progress(100);
        ctx.message(format!("{count} art keys loaded"));
        Ok(())
    }
}

#[cfg(test)]
#[path = "game_art_tests.rs"]
mod tests;
