// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset list of the presence application, from the Discord web API.

use super::discord::DiscordConfig;
use crate::art::ArtCatalog;
use crate::source::SourceError;
use crate::wiimmfi::get_text;
use async_trait::async_trait;
use serde_json::Value;

/// Fetches `oauth2/applications/{client_id}/assets`.
#[derive(Clone)]
pub struct DiscordAssets {
    client: reqwest::Client,
    url: String,
}

impl DiscordAssets {
    pub fn new(config: &DiscordConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("wiirpc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, url: config.assets_url() })
    }
}

#[async_trait]
impl ArtCatalog for DiscordAssets {
    async fn fetch_art_keys(&self) -> Result<Vec<String>, SourceError> {
        let body = get_text(&self.client, &self.url).await?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| SourceError::Parse(format!("asset list: {e}")))?;
        parse_assets(&json)
    }
}

/// Asset names from the `[{"id": .., "name": .., "type": ..}]` listing.
pub fn parse_assets(json: &Value) -> Result<Vec<String>, SourceError> {
    let entries = json
        .as_array()
        .ok_or_else(|| SourceError::Parse("asset list is not an array".to_string()))?;
    Ok(entries
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .map(str::to_string)
        .collect())
}
