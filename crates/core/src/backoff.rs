// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idle backoff for the poll interval.
//!
//! The extra delay grows by `step` on every idle cycle, never beyond
//! `max_delay - min_delay`, and drops to zero as soon as something is shown.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffState {
    current_extra: Duration,
    step: Duration,
    min_delay: Duration,
    max_delay: Duration,
}

impl BackoffState {
    pub fn new(min_delay: Duration, step: Duration, max_delay: Duration) -> Self {
        Self { current_extra: Duration::ZERO, step, min_delay, max_delay }
    }

    pub fn current_extra(&self) -> Duration {
        self.current_extra
    }

    /// Largest extra delay: `max_delay - min_delay` (zero if misconfigured).
    pub fn cap(&self) -> Duration {
        self.max_delay.saturating_sub(self.min_delay)
    }

    /// Delay until the next cycle.
    pub fn interval(&self) -> Duration {
        self.min_delay + self.current_extra
    }

    /// Grow by one step. Returns whether the extra delay changed.
    pub fn advance(&mut self) -> bool {
        let next = (self.current_extra + self.step).min(self.cap());
        let changed = next != self.current_extra;
        self.current_extra = next;
        changed
    }

    /// Drop back to zero. Returns whether there was anything to reset.
    pub fn reset(&mut self) -> bool {
        let had_extra = !self.current_extra.is_zero();
        self.current_extra = Duration::ZERO;
        had_extra
    }

    /// Apply new bounds from reloaded settings, keeping accumulated delay
    /// within the new cap.
    pub fn reconfigure(&mut self, min_delay: Duration, step: Duration, max_delay: Duration) {
        self.min_delay = min_delay;
        self.step = step;
        self.max_delay = max_delay;
        self.current_extra = self.current_extra.min(self.cap());
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
