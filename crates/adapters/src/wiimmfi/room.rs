// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mario Kart Wii room statistics (JSON).

use super::{build_client, get_text, WiimmfiConfig};
use crate::enrichment::{EnrichmentOutcome, EnrichmentSource};
use crate::source::SourceError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use wr_core::Enrichment;

#[derive(Clone)]
pub struct MkwRoomSource {
    client: reqwest::Client,
    config: Arc<WiimmfiConfig>,
}

impl MkwRoomSource {
    pub fn new(config: WiimmfiConfig) -> Result<Self, SourceError> {
        Ok(Self { client: build_client(&config)?, config: Arc::new(config) })
    }
}

#[async_trait]
impl EnrichmentSource for MkwRoomSource {
    /// `lookup_key` is the player's pid.
    async fn fetch_enrichment(&self, lookup_key: &str) -> Result<EnrichmentOutcome, SourceError> {
        let url = self.config.url(&format!("/stats/mkw/room/p{lookup_key}/?m=json"));
        let body = get_text(&self.client, &url).await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        parse_room(&value)
    }
}

/// Interpret the room document. Element 1 describes the room; a missing or
/// zero `race_start` means no race is running.
pub fn parse_room(value: &Value) -> Result<EnrichmentOutcome, SourceError> {
    let Some(room) = value.get(1) else {
        return Ok(EnrichmentOutcome::Ended);
    };
    let race_start = match room.get("race_start").and_then(Value::as_u64) {
        Some(start) if start > 0 => start,
        _ => return Ok(EnrichmentOutcome::Ended),
    };

    let count = |field: &str| -> Result<u32, SourceError> {
        room.get(field)
            .and_then(Value::as_u64)
            .map(|n| n.min(u64::from(u32::MAX)) as u32)
            .ok_or_else(|| SourceError::Parse(format!("room field {field} missing")))
    };
    let track_name = room
        .get("track")
        .and_then(|t| t.get(1))
        .and_then(Value::as_str)
        .ok_or_else(|| SourceError::Parse("room track missing".to_string()))?;

    Ok(EnrichmentOutcome::Active(Enrichment {
        track_name: track_name.to_string(),
        members: count("n_members")?,
        capacity: count("n_players")?,
        race_start_ms: Some(race_start.saturating_mul(1000)),
    }))
}
