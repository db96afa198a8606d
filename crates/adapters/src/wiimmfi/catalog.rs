// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full game list (`/stat?m=25`).

use super::{build_client, cell_text, get_text, selector, WiimmfiConfig};
use crate::catalog::GameCatalog;
use crate::source::SourceError;
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use wr_core::GameEntry;

#[derive(Clone)]
pub struct WiimmfiCatalog {
    client: reqwest::Client,
    config: Arc<WiimmfiConfig>,
}

impl WiimmfiCatalog {
    pub fn new(config: WiimmfiConfig) -> Result<Self, SourceError> {
        Ok(Self { client: build_client(&config)?, config: Arc::new(config) })
    }
}

#[async_trait]
impl GameCatalog for WiimmfiCatalog {
    async fn fetch_games(&self) -> Result<Vec<GameEntry>, SourceError> {
        let html = get_text(&self.client, &self.config.url("/stat?m=25")).await?;
        parse_catalog(&html)
    }
}

/// Parse the `#game` table; the first two rows are headers.
pub fn parse_catalog(html: &str) -> Result<Vec<GameEntry>, SourceError> {
    let document = Html::parse_document(html);
    let table_sel = selector("#game")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| SourceError::Parse("game table missing".to_string()))?;

    let games = table
        .select(&row_sel)
        .skip(2)
        .filter_map(|row| {
            let mut cells = row.select(&cell_sel).map(cell_text);
            let id = cells.next()?;
            let name = cells.next()?;
            (!id.is_empty()).then_some(GameEntry { id, name })
        })
        .collect();
    Ok(games)
}
