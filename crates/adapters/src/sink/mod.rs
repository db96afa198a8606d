// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence sink boundary.

mod assets;
mod discord;

pub use assets::{parse_assets, DiscordAssets};
pub use discord::{activity_json, DiscordConfig, DiscordIpcSink, DEFAULT_API_BASE};

use async_trait::async_trait;
use thiserror::Error;
use wr_core::ActivityPayload;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("presence client is not running (no IPC socket accepted a connection)")]
    NotRunning,
    #[error("handshake rejected: {0}")]
    Handshake(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where presence is displayed.
///
/// `clear_activity` must be idempotent: the poller clears on every idle cycle.
#[async_trait]
pub trait PresenceSink: Send + 'static {
    /// Establish the connection. Failure here is fatal for the poller.
    async fn connect(&mut self) -> Result<(), SinkError>;

    async fn set_activity(&mut self, payload: &ActivityPayload) -> Result<(), SinkError>;

    async fn clear_activity(&mut self) -> Result<(), SinkError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{PresenceSink, SinkError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use wr_core::ActivityPayload;

    /// Recorded sink interaction
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SinkCall {
        Connect,
        Set(ActivityPayload),
        Clear,
    }

    #[derive(Default)]
    struct FakeSinkState {
        calls: Vec<SinkCall>,
        refuse_connect: bool,
        fail_pushes: bool,
    }

    /// In-memory sink; clones share the call log.
    #[derive(Clone, Default)]
    pub struct FakePresenceSink {
        inner: Arc<Mutex<FakeSinkState>>,
    }

    impl FakePresenceSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// A sink whose `connect` always fails.
        pub fn refusing() -> Self {
            let sink = Self::default();
            sink.inner.lock().refuse_connect = true;
            sink
        }

        pub fn set_fail_pushes(&self, fail: bool) {
            self.inner.lock().fail_pushes = fail;
        }

        pub fn calls(&self) -> Vec<SinkCall> {
            self.inner.lock().calls.clone()
        }

        /// Only the `Set` payloads, in order.
        pub fn pushes(&self) -> Vec<ActivityPayload> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::Set(p) => Some(p.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn clears(&self) -> usize {
            self.inner.lock().calls.iter().filter(|c| matches!(c, SinkCall::Clear)).count()
        }

        pub fn reset_calls(&self) {
            self.inner.lock().calls.clear();
        }
    }

    #[async_trait]
    impl PresenceSink for FakePresenceSink {
        async fn connect(&mut self) -> Result<(), SinkError> {
            let mut inner = self.inner.lock();
            inner.calls.push(SinkCall::Connect);
            if inner.refuse_connect {
                return Err(SinkError::NotRunning);
            }
            Ok(())
        }

        async fn set_activity(&mut self, payload: &ActivityPayload) -> Result<(), SinkError> {
            let mut inner = self.inner.lock();
            if inner.fail_pushes {
                return Err(SinkError::Protocol("scripted failure".to_string()));
            }
            // Same lower bound the desktop client enforces.
            for (field, text) in [("state", &payload.state), ("details", &payload.details)] {
                if text.chars().count() < 2 {
                    return Err(SinkError::Protocol(format!(
                        "{field} length must be at least 2 characters long"
                    )));
                }
            }
            inner.calls.push(SinkCall::Set(payload.clone()));
            Ok(())
        }

        async fn clear_activity(&mut self) -> Result<(), SinkError> {
            let mut inner = self.inner.lock();
            if inner.fail_pushes {
                return Err(SinkError::Protocol("scripted failure".to_string()));
            }
            inner.calls.push(SinkCall::Clear);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePresenceSink, SinkCall};
