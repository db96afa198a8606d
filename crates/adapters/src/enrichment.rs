// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secondary lookup for identities that carry extra room metadata.

use crate::source::SourceError;
use async_trait::async_trait;
use wr_core::Enrichment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    Active(Enrichment),
    /// The room closed or the race has not started; show base presence only.
    Ended,
}

#[async_trait]
pub trait EnrichmentSource: Clone + Send + Sync + 'static {
    async fn fetch_enrichment(&self, lookup_key: &str) -> Result<EnrichmentOutcome, SourceError>;
}

/// Enrichment source for setups without special-case identities.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEnrichment;

#[async_trait]
impl EnrichmentSource for NoEnrichment {
    async fn fetch_enrichment(&self, _lookup_key: &str) -> Result<EnrichmentOutcome, SourceError> {
        Ok(EnrichmentOutcome::Ended)
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{EnrichmentOutcome, EnrichmentSource};
    use crate::source::SourceError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use wr_core::Enrichment;

    #[derive(Default)]
    struct FakeEnrichmentState {
        rooms: HashMap<String, Result<Enrichment, SourceError>>,
        calls: Vec<String>,
    }

    /// Scripted enrichment; keys without a room report `Ended`.
    #[derive(Clone, Default)]
    pub struct FakeEnrichmentSource {
        inner: Arc<Mutex<FakeEnrichmentState>>,
    }

    impl FakeEnrichmentSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_room(&self, lookup_key: &str, enrichment: Enrichment) {
            self.inner.lock().rooms.insert(lookup_key.to_string(), Ok(enrichment));
        }

        pub fn set_error(&self, lookup_key: &str, error: SourceError) {
            self.inner.lock().rooms.insert(lookup_key.to_string(), Err(error));
        }

        pub fn end_room(&self, lookup_key: &str) {
            self.inner.lock().rooms.remove(lookup_key);
        }

        pub fn calls(&self) -> Vec<String> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl EnrichmentSource for FakeEnrichmentSource {
        async fn fetch_enrichment(
            &self,
            lookup_key: &str,
        ) -> Result<EnrichmentOutcome, SourceError> {
            let mut inner = self.inner.lock();
            inner.calls.push(lookup_key.to_string());
            match inner.rooms.get(lookup_key) {
                Some(Ok(room)) => Ok(EnrichmentOutcome::Active(room.clone())),
                Some(Err(e)) => Err(e.clone()),
                None => Ok(EnrichmentOutcome::Ended),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeEnrichmentSource;
