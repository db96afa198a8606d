// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiimmfi HTTP adapters: game pages, game catalog, and MKW room info.
//!
//! Base URL, User-Agent, and timeout are injected through
//! [`WiimmfiConfig`]; nothing here reads process-wide state.

mod catalog;
mod game_page;
mod room;

pub use catalog::{parse_catalog, WiimmfiCatalog};
pub use game_page::{parse_game_page, WiimmfiSource};
pub use room::{parse_room, MkwRoomSource};

use crate::source::SourceError;
use scraper::{ElementRef, Selector};
use std::time::Duration;

/// Connection settings for the Wiimmfi website.
#[derive(Debug, Clone)]
pub struct WiimmfiConfig {
    /// e.g. `https://wiimmfi.de`, without trailing slash.
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for WiimmfiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wiimmfi.de".to_string(),
            user_agent: concat!("wiirpc/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl WiimmfiConfig {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Build the shared HTTP client.
pub fn build_client(config: &WiimmfiConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| SourceError::Http(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and return the body of a 2xx response.
pub(crate) async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Http(format!("{url}: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    response.text().await.map_err(|e| SourceError::Http(format!("{url}: {e}")))
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("invalid selector {css}: {e:?}")))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
