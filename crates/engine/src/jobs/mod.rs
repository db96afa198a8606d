// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance jobs that run through the transient queue.

mod game_art;
mod game_list;

pub use game_art::GameArtRefresh;
pub use game_list::{load_cache, GameListRefresh, GAME_LIST_FILE, GAME_LIST_MAX_AGE};
