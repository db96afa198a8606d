// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::{Config, LifecycleError};

pub const LOG_FILE: &str = "wrd.log";

/// Install the global subscriber: plain text into `<log_dir>/wrd.log` plus
/// stderr, both filtered by `WR_LOG`.
///
/// Keep the returned guard alive; dropping it flushes and stops the writer.
pub fn init_logging(config: &Config) -> Result<WorkerGuard, LifecycleError> {
    std::fs::create_dir_all(&config.log_dir)?;
    let appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directive = crate::env::log_filter();
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        LifecycleError::Logging(format!("invalid filter {directive:?}: {e}"))
    })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;

    Ok(guard)
}
