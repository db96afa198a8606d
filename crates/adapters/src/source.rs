// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Candidate source boundary.

use async_trait::async_trait;
use thiserror::Error;
use wr_core::CandidateList;

/// A single lookup failed. Recovered by skipping the identity for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Result of asking the source about one identity key.
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    /// The source does not know the key.
    NotFound,
    /// Known key, nobody active.
    Empty,
    Found(CandidateList),
}

/// Returns the currently active entries for an identity key.
#[async_trait]
pub trait CandidateSource: Clone + Send + Sync + 'static {
    async fn fetch_candidates(&self, identity_key: &str) -> Result<SourceOutcome, SourceError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{CandidateSource, SourceError, SourceOutcome};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use wr_core::CandidateList;

    #[derive(Default)]
    struct FakeSourceState {
        responses: HashMap<String, Result<SourceOutcome, SourceError>>,
        calls: Vec<String>,
    }

    /// Scripted candidate source. Responses stick until replaced; unknown
    /// keys report `NotFound`.
    #[derive(Clone, Default)]
    pub struct FakeCandidateSource {
        inner: Arc<Mutex<FakeSourceState>>,
    }

    impl FakeCandidateSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_found(&self, key: &str, list: CandidateList) {
            self.inner.lock().responses.insert(key.to_string(), Ok(SourceOutcome::Found(list)));
        }

        pub fn set_empty(&self, key: &str) {
            self.inner.lock().responses.insert(key.to_string(), Ok(SourceOutcome::Empty));
        }

        pub fn set_error(&self, key: &str, error: SourceError) {
            self.inner.lock().responses.insert(key.to_string(), Err(error));
        }

        /// Forget every scripted response.
        pub fn clear(&self) {
            self.inner.lock().responses.clear();
        }

        /// Keys queried so far, in order.
        pub fn calls(&self) -> Vec<String> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl CandidateSource for FakeCandidateSource {
        async fn fetch_candidates(
            &self,
            identity_key: &str,
        ) -> Result<SourceOutcome, SourceError> {
            let mut inner = self.inner.lock();
            inner.calls.push(identity_key.to_string());
            inner.responses.get(identity_key).cloned().unwrap_or(Ok(SourceOutcome::NotFound))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCandidateSource;
