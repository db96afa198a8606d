// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeps the cached Wiimmfi game list at most a week old.

use crate::job::{Job, JobContext, JobError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wr_adapters::GameCatalog;
use wr_core::{Clock, GameListCache, JobKind};

pub const GAME_LIST_FILE: &str = "wiimmfi_games.json";
pub const GAME_LIST_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub struct GameListRefresh<G, C> {
    catalog: G,
    clock: C,
    cache_dir: PathBuf,
    max_age: Duration,
}

impl<G: GameCatalog, C: Clock> GameListRefresh<G, C> {
    pub fn new(catalog: G, clock: C, cache_dir: impl Into<PathBuf>) -> Self {
        Self { catalog, clock, cache_dir: cache_dir.into(), max_age: GAME_LIST_MAX_AGE }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(GAME_LIST_FILE)
    }
}

/// Read the cache file. Missing or unreadable files yield `None`.
pub async fn load_cache(path: &Path) -> Option<GameListCache> {
    let bytes = tokio::fs::read(path).await.ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(cache) => Some(cache),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt game list cache");
            None
        }
    }
}

async fn store_cache(path: &Path, cache: &GameListCache) -> Result<(), JobError> {
    let fail =
        |e: std::io::Error| JobError::Failed(format!("could not write {}: {e}", path.display()));
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(fail)?;
    }
    let json = serde_json::to_vec_pretty(cache)
        .map_err(|e| JobError::Failed(format!("could not encode game list: {e}")))?;
    // Write then rename so readers never see a partial file.
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await.map_err(fail)?;
    tokio::fs::rename(&tmp, path).await.map_err(fail)
}

#[async_trait]
impl<G: GameCatalog, C: Clock> Job for GameListRefresh<G, C> {
    fn name(&self) -> String {
        "game list refresh".to_string()
    }

    fn kind(&self) -> JobKind {
        JobKind::Transient
    }

    fn friendly_progress(&self) -> Option<String> {
        Some("Checking games list".to_string())
    }

    async fn run(self: Box<Self>, ctx: JobContext) -> Result<(), JobError> {
        let path = self.cache_path();
        let now_ms = self.clock.epoch_ms();
        ctx.progress(0);

        if let Some(cache) = load_cache(&path).await {
            if cache.is_fresh(now_ms, self.max_age) {
                ctx.message("Game list up to date");
                ctx.progress(100);
                return Ok(());
            }
        }

        ctx.message("Downloading games list");
        let games = self
            .catalog
            .fetch_games()
            .await
            .map_err(|e| JobError::Failed(format!("could not download games list: {e}")))?;
        ctx.progress(60);

        let cache = GameListCache { updated_ms: now_ms, games };
        store_cache(&path, &cache).await?;
        ctx.progress(100);

        ctx.message(format!("{} games cached", cache.games.len()));
        match serde_json::to_value(&cache.games) {
            Ok(payload) => ctx.data(payload),
            Err(e) => ctx.warn(format!("could not encode game list event: {e}")),
        }
        ctx.info("Downloaded games list");
        Ok(())
    }
}

#[cfg(test)]
#[path = "game_list_tests.rs"]
mod tests;
