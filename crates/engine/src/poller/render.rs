// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence state to sink payload.

use super::settings::PollSettings;
use wr_core::{ActivityPayload, Enrichment, PresenceState};

pub const NO_PLAYER_NAME: &str = "No player name";
pub const NO_IMAGE: &str = "no_image";

/// Shortest text the presence client accepts in a text field.
pub const MIN_TEXT_CHARS: usize = 2;
const FILLER: char = '\u{200B}';

pub fn render(
    presence: &PresenceState,
    enrichment: Option<&Enrichment>,
    settings: &PollSettings,
) -> ActivityPayload {
    let candidate = &presence.candidate;

    let (state, party_size, start_ms) = match enrichment {
        Some(room) => (
            room.track_name.clone(),
            Some((room.members, room.capacity)),
            room.race_start_ms.unwrap_or(presence.started_at_ms),
        ),
        None => (
            candidate.player_names().unwrap_or_else(|| NO_PLAYER_NAME.to_string()),
            None,
            presence.started_at_ms,
        ),
    };

    let art_key = candidate.identity_key.to_lowercase();
    let large_image = match &settings.art_keys {
        Some(known) if !known.contains(&art_key) => NO_IMAGE.to_string(),
        _ => art_key,
    };

    ActivityPayload {
        state: padded(&state),
        details: padded(settings.status_text(&candidate.status_code)),
        start_ms,
        party_size,
        large_image,
        large_text: padded(&candidate.game_name),
        small_image: settings.branding.small_image.clone(),
        small_text: padded(&settings.branding.small_text),
    }
}

/// Extend `text` with zero-width spaces up to [`MIN_TEXT_CHARS`].
fn padded(text: &str) -> String {
    let missing = MIN_TEXT_CHARS.saturating_sub(text.chars().count());
    let mut out = String::with_capacity(text.len() + missing * FILLER.len_utf8());
    out.push_str(text);
    out.extend(std::iter::repeat(FILLER).take(missing));
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
