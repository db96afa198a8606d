// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction.
//!
//! Presence start timestamps and cache freshness checks read time through
//! [`Clock`] so tests can pin and advance it.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Source of monotonic and wall-clock time.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

struct FakeTime {
    instant: Instant,
    epoch_ms: u64,
}

/// Manually driven clock shared between clones.
#[derive(Clone)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    /// Starts at an arbitrary instant with the epoch pinned to 1_700_000_000_000 ms.
    pub fn new() -> Self {
        Self {
            time: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                epoch_ms: 1_700_000_000_000,
            })),
        }
    }

    /// Move both the monotonic and the wall clock forward.
    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock();
        time.instant += by;
        time.epoch_ms += by.as_millis() as u64;
    }

    pub fn set_epoch_ms(&self, ms: u64) {
        self.time.lock().epoch_ms = ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().instant
    }

    fn epoch_ms(&self) -> u64 {
        self.time.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
