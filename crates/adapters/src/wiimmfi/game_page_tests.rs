// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn player_row(pid: &str, fc: &str, status: &str, p1: &str, p2: &str) -> String {
    format!(
        "<tr><td>RMCJ</td><td>{pid}</td><td>{fc}</td><td>x</td><td>x</td><td>x</td>\
         <td>x</td><td>{status}</td><td>x</td><td>x</td><td>{p1}</td><td>{p2}</td></tr>"
    )
}

fn page(rows: &[String]) -> String {
    format!(
        "<html><body><table id=\"online\">\
         <tr><th colspan=\"12\">Mario Kart Wii</th></tr>\
         <tr><th>id4</th><th>pid</th><th>friend code</th></tr>\
         {}</table></body></html>",
        rows.join("")
    )
}

#[test]
fn parses_player_rows() {
    let html = page(&[
        player_row("600100", "1111-2222-3333", "o", "Mario", "\u{2014}"),
        player_row("600200", "4444-5555-6666", "h", "Luigi", "Daisy"),
    ]);
    let SourceOutcome::Found(list) = parse_game_page(&html, "RMCJ", 77).unwrap() else {
        panic!("expected candidates");
    };
    assert_eq!(list.display_name, "Mario Kart Wii");
    assert_eq!(list.len(), 2);

    let mario = list.find("1111-2222-3333").unwrap();
    assert_eq!(mario.status_code, "o");
    assert_eq!(mario.display_name_2, None);
    assert_eq!(mario.session_id.as_deref(), Some("600100"));
    assert_eq!(mario.observed_at_ms, 77);
    assert_eq!(mario.game_name, "Mario Kart Wii");

    let luigi = list.find("4444-5555-6666").unwrap();
    assert_eq!(luigi.display_name_2.as_deref(), Some("Daisy"));
}

#[test]
fn missing_table_is_not_found() {
    let outcome = parse_game_page("<html><body><p>no such game</p></body></html>", "XXXX", 0);
    assert!(matches!(outcome, Ok(SourceOutcome::NotFound)));
}

#[test]
fn blank_table_is_empty() {
    let outcome = parse_game_page("<table id=\"online\"> </table>", "RMCJ", 0);
    assert!(matches!(outcome, Ok(SourceOutcome::Empty)));
}

#[test]
fn short_rows_are_skipped() {
    let html = page(&["<tr><td>RMCJ</td><td>1</td></tr>".to_string()]);
    assert!(matches!(parse_game_page(&html, "RMCJ", 0), Ok(SourceOutcome::Empty)));
}
