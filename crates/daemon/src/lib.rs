// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WiiRPC daemon library
//!
//! Wires the Wiimmfi sources, the Discord sink and desktop alerts into the
//! job scheduler, and keeps the poll settings in sync with `config.toml`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod env;
pub mod lifecycle;

pub use config::{ConfigError, ConfigFile};
pub use lifecycle::{init_logging, startup, startup_with, Config, DaemonState, LifecycleError};
