// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn same_identity_ignores_everything_but_code() {
    let a = Candidate::builder().correlation_code("X").status_code("o").build();
    let b = Candidate::builder()
        .correlation_code("X")
        .status_code("h")
        .identity_key("RMCP")
        .display_name_1("Other")
        .build();
    assert!(a.same_identity(&b));
    assert!(!a.same_identity(&Candidate::builder().correlation_code("Y").build()));
}

#[test]
fn status_changed_requires_same_identity() {
    let a = Candidate::builder().correlation_code("X").status_code("online").build();
    let b = Candidate::builder().correlation_code("Y").status_code("away").build();
    assert!(!a.status_changed(&b));
}

#[yare::parameterized(
    same        = { "o", "o", "P1", false },
    status      = { "o", "h", "P1", true },
    player_name = { "o", "o", "P2", true },
)]
fn status_changed_cases(before: &str, after: &str, name_after: &str, changed: bool) {
    let a = Candidate::builder().status_code(before).display_name_1("P1").build();
    let b = Candidate::builder().status_code(after).display_name_1(name_after).build();
    assert_eq!(a.status_changed(&b), changed);
}

#[yare::parameterized(
    both          = { "Mario", Some("Luigi"), Some("Mario | Luigi") },
    first_only    = { "Mario", None, Some("Mario") },
    blank_second  = { "Mario", Some(" "), Some("Mario") },
    nobody        = { "", None, None },
)]
fn player_names(first: &str, second: Option<&str>, expected: Option<&str>) {
    let mut c = Candidate::builder().display_name_1(first).build();
    c.display_name_2 = second.map(str::to_string);
    assert_eq!(c.player_names().as_deref(), expected);
}

#[test]
fn lookup_key_prefers_session_id() {
    let c = Candidate::builder().correlation_code("FC").session_id("600123").build();
    assert_eq!(c.lookup_key(), "600123");
    let c = Candidate::builder().correlation_code("FC").build();
    assert_eq!(c.lookup_key(), "FC");
}

#[test]
fn list_find_matches_code() {
    let list = CandidateList::new(
        "Mario Kart Wii",
        vec![
            Candidate::builder().correlation_code("A").build(),
            Candidate::builder().correlation_code("B").display_name_1("Bee").build(),
        ],
    );
    assert_eq!(list.len(), 2);
    assert_eq!(list.find("B").map(|c| c.display_name_1.as_str()), Some("Bee"));
    assert!(list.find("C").is_none());
}
