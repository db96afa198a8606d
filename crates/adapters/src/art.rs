// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Art catalog boundary: which game ids have uploaded cover art.

use crate::source::SourceError;
use async_trait::async_trait;

/// Lists the image keys registered for the presence application.
#[async_trait]
pub trait ArtCatalog: Clone + Send + Sync + 'static {
    async fn fetch_art_keys(&self) -> Result<Vec<String>, SourceError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::ArtCatalog;
    use crate::source::SourceError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeArtState {
        keys: Result<Vec<String>, SourceError>,
        fetches: usize,
    }

    #[derive(Clone)]
    pub struct FakeArtCatalog {
        inner: Arc<Mutex<FakeArtState>>,
    }

    impl FakeArtCatalog {
        pub fn new<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
            let keys = keys.into_iter().map(Into::into).collect();
            Self { inner: Arc::new(Mutex::new(FakeArtState { keys: Ok(keys), fetches: 0 })) }
        }

        pub fn failing(error: SourceError) -> Self {
            Self { inner: Arc::new(Mutex::new(FakeArtState { keys: Err(error), fetches: 0 })) }
        }

        pub fn fetches(&self) -> usize {
            self.inner.lock().fetches
        }
    }

    #[async_trait]
    impl ArtCatalog for FakeArtCatalog {
        async fn fetch_art_keys(&self) -> Result<Vec<String>, SourceError> {
            let mut inner = self.inner.lock();
            inner.fetches += 1;
            inner.keys.clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeArtCatalog;
