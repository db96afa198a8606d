// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Escalation of failed jobs to the user.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert failed: {0}")]
    SendFailed(String),
}

/// Receives `(job name, detail)` whenever a job fails.
#[async_trait]
pub trait ErrorReporter: Clone + Send + Sync + 'static {
    async fn report(&self, job_name: &str, detail: &str) -> Result<(), AlertError>;
}

/// Raises a desktop notification per failure.
///
/// On macOS the bundle identifier is pinned up front; otherwise
/// `mac-notification-sys` looks it up with AppleScript, which hangs in a
/// daemon without Automation permission.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopAlerts;

impl DesktopAlerts {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl ErrorReporter for DesktopAlerts {
    async fn report(&self, job_name: &str, detail: &str) -> Result<(), AlertError> {
        let summary = format!("WiiRPC: {job_name} failed");
        let body = detail.to_string();
        // show() is synchronous; never block the runtime on it.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = notify_rust::Notification::new().summary(&summary).body(&body).show() {
                tracing::warn!(%summary, error = %e, "desktop alert failed");
            }
        });
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{AlertError, ErrorReporter};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AlertCall {
        pub job_name: String,
        pub detail: String,
    }

    /// Records every reported failure.
    #[derive(Clone, Default)]
    pub struct FakeErrorReporter {
        calls: Arc<Mutex<Vec<AlertCall>>>,
    }

    impl FakeErrorReporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<AlertCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl ErrorReporter for FakeErrorReporter {
        async fn report(&self, job_name: &str, detail: &str) -> Result<(), AlertError> {
            self.calls
                .lock()
                .push(AlertCall { job_name: job_name.to_string(), detail: detail.to_string() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{AlertCall, FakeErrorReporter};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_records_reports_in_order() {
        let reporter = FakeErrorReporter::new();
        reporter.report("game list", "HTTP 503").await.unwrap();
        reporter.report("poller", "sink refused").await.unwrap();

        let calls = reporter.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], AlertCall { job_name: "game list".into(), detail: "HTTP 503".into() });
        assert_eq!(calls[1].job_name, "poller");
    }
}
