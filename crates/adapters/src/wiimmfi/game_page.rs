// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/game/{id}` page scraping.

use super::{build_client, cell_text, get_text, selector, WiimmfiConfig};
use crate::source::{CandidateSource, SourceError, SourceOutcome};
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use wr_core::{Candidate, CandidateList, Clock, SystemClock};

/// Marker the site uses for "no second player".
const NO_PLAYER: &str = "\u{2014}";

// Column layout of the `#online` table.
const COL_GAME_ID: usize = 0;
const COL_PID: usize = 1;
const COL_FRIEND_CODE: usize = 2;
const COL_STATUS: usize = 7;
const COL_PLAYER_1: usize = 10;
const COL_PLAYER_2: usize = 11;

/// Candidate source reading the public per-game player tables.
#[derive(Clone)]
pub struct WiimmfiSource<C: Clock = SystemClock> {
    client: reqwest::Client,
    config: Arc<WiimmfiConfig>,
    clock: C,
}

impl WiimmfiSource<SystemClock> {
    pub fn new(config: WiimmfiConfig) -> Result<Self, SourceError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> WiimmfiSource<C> {
    pub fn with_clock(config: WiimmfiConfig, clock: C) -> Result<Self, SourceError> {
        Ok(Self { client: build_client(&config)?, config: Arc::new(config), clock })
    }
}

#[async_trait]
impl<C: Clock> CandidateSource for WiimmfiSource<C> {
    async fn fetch_candidates(&self, identity_key: &str) -> Result<SourceOutcome, SourceError> {
        let url = self.config.url(&format!("/game/{identity_key}"));
        let html = get_text(&self.client, &url).await?;
        tracing::trace!(identity_key, bytes = html.len(), "game page received");
        parse_game_page(&html, identity_key, self.clock.epoch_ms())
    }
}

/// Parse a game page into candidates.
///
/// A missing `#online` table means the game is unknown; an empty one means
/// nobody is online.
pub fn parse_game_page(
    html: &str,
    identity_key: &str,
    observed_at_ms: u64,
) -> Result<SourceOutcome, SourceError> {
    let document = Html::parse_document(html);
    let table_sel = selector("#online")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let Some(table) = document.select(&table_sel).next() else {
        return Ok(SourceOutcome::NotFound);
    };
    if table.text().all(|t| t.trim().is_empty()) {
        return Ok(SourceOutcome::Empty);
    }

    let rows: Vec<_> = table.select(&row_sel).collect();
    let game_name = rows.first().map(|r| cell_text(*r)).unwrap_or_default();

    let mut candidates = Vec::new();
    // Row 0 is the game title, row 1 the column headers.
    for row in rows.iter().skip(2) {
        let cells: Vec<String> = row.select(&cell_sel).map(cell_text).collect();
        if cells.len() <= COL_PLAYER_2 {
            tracing::debug!(identity_key, columns = cells.len(), "skipping short player row");
            continue;
        }
        let player_2 = match cells[COL_PLAYER_2].as_str() {
            "" | NO_PLAYER => None,
            name => Some(name.to_string()),
        };
        let game_id = if cells[COL_GAME_ID].is_empty() {
            identity_key.to_string()
        } else {
            cells[COL_GAME_ID].clone()
        };
        candidates.push(Candidate {
            identity_key: game_id,
            game_name: game_name.clone(),
            correlation_code: cells[COL_FRIEND_CODE].clone(),
            status_code: cells[COL_STATUS].clone(),
            display_name_1: cells[COL_PLAYER_1].clone(),
            display_name_2: player_2,
            session_id: Some(cells[COL_PID].clone()).filter(|pid| !pid.is_empty()),
            observed_at_ms,
        });
    }

    if candidates.is_empty() {
        return Ok(SourceOutcome::Empty);
    }
    Ok(SourceOutcome::Found(CandidateList::new(game_name, candidates)))
}

#[cfg(test)]
#[path = "game_page_tests.rs"]
mod tests;
