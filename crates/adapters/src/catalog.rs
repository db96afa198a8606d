// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Game catalog boundary used by the game list refresh job.

use crate::source::SourceError;
use async_trait::async_trait;
use wr_core::GameEntry;

#[async_trait]
pub trait GameCatalog: Clone + Send + Sync + 'static {
    async fn fetch_games(&self) -> Result<Vec<GameEntry>, SourceError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::GameCatalog;
    use crate::source::SourceError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use wr_core::GameEntry;

    struct FakeCatalogState {
        games: Result<Vec<GameEntry>, SourceError>,
        fetches: usize,
    }

    #[derive(Clone)]
    pub struct FakeGameCatalog {
        inner: Arc<Mutex<FakeCatalogState>>,
    }

    impl FakeGameCatalog {
        pub fn new(games: Vec<GameEntry>) -> Self {
            Self { inner: Arc::new(Mutex::new(FakeCatalogState { games: Ok(games), fetches: 0 })) }
        }

        pub fn failing(error: SourceError) -> Self {
            Self { inner: Arc::new(Mutex::new(FakeCatalogState { games: Err(error), fetches: 0 })) }
        }

        pub fn fetches(&self) -> usize {
            self.inner.lock().fetches
        }
    }

    #[async_trait]
    impl GameCatalog for FakeGameCatalog {
        async fn fetch_games(&self) -> Result<Vec<GameEntry>, SourceError> {
            let mut inner = self.inner.lock();
            inner.fetches += 1;
            inner.games.clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeGameCatalog;
