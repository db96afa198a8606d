// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence polling specs
//!
//! Verify winner selection, session start times, backoff and the payloads
//! handed to the presence sink.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn switching_games_backs_off_then_resets() {
    let mut w = World::start(vec![identity("A", "AAAA", 2), identity("B", "BBBB", 2)]);
    let t0 = w.clock.epoch_ms();

    // Only B is online
    w.online(candidate("B", "BBBB"));
    let first = w.cycle(1).await;
    assert_eq!(first.mode, PresenceMode::Active);
    assert_eq!(code_of(&first), Some("BBBB"));
    assert_eq!(first.next_poll_in, 15 * SECOND);

    let pushed = w.sink.pushes();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].state, "Player BBBB");
    assert_eq!(pushed[0].details, "Online");
    assert_eq!(pushed[0].start_ms, t0);
    assert_eq!(pushed[0].large_image, "b");
    assert_eq!(pushed[0].large_text, "Game B");
    assert_eq!(pushed[0].small_image, "wiimmfi");

    // Nobody online
    w.source.clear();
    let second = w.cycle(2).await;
    assert_eq!(second.mode, PresenceMode::Idle);
    assert_eq!(second.backoff_extra, 15 * SECOND);
    assert_eq!(second.next_poll_in, 30 * SECOND);
    assert_eq!(w.sink.calls().last(), Some(&SinkCall::Clear));

    // A comes online later
    w.clock.advance(30 * SECOND);
    w.online(candidate("A", "AAAA"));
    let third = w.cycle(3).await;
    assert_eq!(code_of(&third), Some("AAAA"));
    assert_eq!(third.presence.as_ref().unwrap().started_at_ms, t0 + 30_000);
    assert_eq!(third.backoff_extra, Duration::ZERO);
    assert_eq!(third.next_poll_in, 15 * SECOND);

    assert_eq!(
        w.poller_logs()
            .into_iter()
            .filter(|l| l.starts_with("Now playing") || l.starts_with("Stopped playing"))
            .collect::<Vec<_>>(),
        vec!["Now playing: Game B", "Stopped playing: Game B", "Now playing: Game A"]
    );
}

#[tokio::test(start_paused = true)]
async fn lowest_priority_value_wins_and_ties_go_to_the_later_identity() {
    let mut w = World::start(vec![
        identity("A", "AAAA", 3),
        identity("B", "BBBB", 1),
        identity("C", "CCCC", 1),
    ]);
    for (key, code) in [("A", "AAAA"), ("B", "BBBB"), ("C", "CCCC")] {
        w.online(candidate(key, code));
    }

    assert_eq!(code_of(&w.cycle(1).await), Some("CCCC"));
    assert_eq!(w.sink.pushes()[0].large_text, "Game C");
}

#[tokio::test(start_paused = true)]
async fn status_change_keeps_session_start() {
    let mut w = World::start(vec![identity("RSBE", "0000-1111-2222", 1)]);
    w.online(candidate_with_status("RSBE", "0000-1111-2222", "o"));
    let started = w.cycle(1).await.presence.unwrap().started_at_ms;

    w.clock.advance(15 * SECOND);
    w.online(candidate_with_status("RSBE", "0000-1111-2222", "V"));
    let second = w.cycle(2).await;

    assert_eq!(second.presence.unwrap().started_at_ms, started);
    let pushes = w.sink.pushes();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[1].details, "Versus race");
    assert_eq!(pushes[1].start_ms, started);
}

#[tokio::test(start_paused = true)]
async fn mario_kart_rooms_replace_the_player_line() {
    let mut w = World::start(vec![identity("RMCJ", "1234-5678-9012", 1)]);
    w.online(candidate("RMCJ", "1234-5678-9012"));
    w.rooms.set_room(
        "1234-5678-9012",
        Enrichment {
            track_name: "Luigi Circuit".to_string(),
            members: 8,
            capacity: 12,
            race_start_ms: Some(1_000),
        },
    );

    w.cycle(1).await;
    let pushed = w.sink.pushes();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].state, "Luigi Circuit");
    assert_eq!(pushed[0].party_size, Some((8, 12)));
    assert_eq!(pushed[0].start_ms, 1_000);
}

#[tokio::test(start_paused = true)]
async fn disabling_clears_and_enabling_resumes() {
    let mut w = World::start(vec![identity("K", "X", 1)]);
    w.online(candidate("K", "X"));
    w.cycle(1).await;

    w.settings.set_disabled(true);
    let disabled = w.cycle(2).await;
    assert_eq!(disabled.mode, PresenceMode::Disabled);
    assert!(disabled.shown.is_none());
    assert_eq!(w.sink.calls().last(), Some(&SinkCall::Clear));

    w.settings.set_disabled(false);
    let n = disabled.cycles + 2;
    let resumed = w.cycle(n).await;
    assert_eq!(resumed.mode, PresenceMode::Active);
    assert_eq!(w.sink.pushes().len(), 2);
    assert!(w.poller_logs().contains(&"Presence disabled".to_string()));
}
