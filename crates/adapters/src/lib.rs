// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for the outside world: the status site, the presence client
//! with its asset list, and desktop alerts.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod alert;
pub mod art;
pub mod catalog;
pub mod enrichment;
pub mod sink;
pub mod source;
pub mod wiimmfi;

pub use alert::{AlertError, DesktopAlerts, ErrorReporter};
pub use art::ArtCatalog;
pub use catalog::GameCatalog;
pub use enrichment::{EnrichmentOutcome, EnrichmentSource, NoEnrichment};
pub use sink::{
    activity_json, DiscordAssets, DiscordConfig, DiscordIpcSink, PresenceSink, SinkError,
    DEFAULT_API_BASE,
};
pub use source::{CandidateSource, SourceError, SourceOutcome};
pub use wiimmfi::{MkwRoomSource, WiimmfiCatalog, WiimmfiConfig, WiimmfiSource};

#[cfg(any(test, feature = "test-support"))]
pub use alert::{AlertCall, FakeErrorReporter};
#[cfg(any(test, feature = "test-support"))]
pub use art::FakeArtCatalog;
#[cfg(any(test, feature = "test-support"))]
pub use catalog::FakeGameCatalog;
#[cfg(any(test, feature = "test-support"))]
pub use enrichment::FakeEnrichmentSource;
#[cfg(any(test, feature = "test-support"))]
pub use sink::{FakePresenceSink, SinkCall};
#[cfg(any(test, feature = "test-support"))]
pub use source::FakeCandidateSource;
