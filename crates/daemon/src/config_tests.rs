// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;
use yare::parameterized;

const FULL: &str = r#"
[rpc]
client_id = "123456789012345678"
min_delay_secs = 10
backoff_step_secs = 5
max_delay_secs = 60
tie_break = "first_wins"

[presence]
small_text = "Wiimmfi (CTGP)"
enrich = ["RMCJ", "RMCE"]

[statuses]
o = "Lurking"
x = "Custom"

[[identity]]
key = "RMCJ"
code = "1234-5678-9012"
priority = 2

[[identity]]
key = "RSBE"
code = "0000-1111-2222"
"#;

fn parse(text: &str) -> Result<ConfigFile, ConfigError> {
    ConfigFile::parse(Path::new("config.toml"), text)
}

#[test]
fn full_file_maps_onto_settings() {
    let file = parse(FULL).unwrap();
    assert_eq!(file.client_id().unwrap(), "123456789012345678");

    let settings = file.poll_settings().unwrap();
    assert_eq!(settings.min_delay, Duration::from_secs(10));
    assert_eq!(settings.backoff_step, Duration::from_secs(5));
    assert_eq!(settings.max_delay, Duration::from_secs(60));
    assert_eq!(settings.disabled_poll_interval, Duration::from_secs(1));
    assert_eq!(settings.tie_break, TieBreak::FirstWins);
    assert_eq!(
        settings.identities,
        vec![
            TrackedIdentity::new("RMCJ", "1234-5678-9012", 2),
            TrackedIdentity::new("RSBE", "0000-1111-2222", 1),
        ]
    );
    assert!(settings.wants_enrichment("RMCE"));
    assert_eq!(settings.branding.small_image, "wiimmfi");
    assert_eq!(settings.branding.small_text, "Wiimmfi (CTGP)");
    assert_eq!(settings.art_keys, None);
}

#[test]
fn art_keys_come_from_the_asset_list_not_the_file() {
    let text = "[presence]\nart_keys = [\"RMCJ\"]\n";
    assert!(matches!(parse(text), Err(ConfigError::Parse(..))));
}

#[test]
fn status_table_merges_over_defaults() {
    let settings = parse(FULL).unwrap().poll_settings().unwrap();
    assert_eq!(settings.status_text("o"), "Lurking");
    assert_eq!(settings.status_text("x"), "Custom");
    assert_eq!(settings.status_text("V"), "Versus race");
}

#[test]
fn empty_file_gives_default_settings() {
    let file = parse("").unwrap();
    assert_eq!(file.poll_settings().unwrap(), PollSettings::default());
    assert!(matches!(file.client_id(), Err(ConfigError::MissingClientId)));
}

#[parameterized(
    zero_min = { "[rpc]\nmin_delay_secs = 0" },
    zero_disabled_poll = { "[rpc]\ndisabled_poll_secs = 0" },
    max_below_min = { "[rpc]\nmin_delay_secs = 30\nmax_delay_secs = 20" },
)]
fn bad_delays_are_rejected(text: &str) {
    assert!(parse(text).unwrap().poll_settings().is_err());
}

#[parameterized(
    unknown_section_key = { "[rpc]\npoll = 3" },
    wrong_type = { "[rpc]\ndisabled = \"yes\"" },
    bad_tie_break = { "[rpc]\ntie_break = \"random\"" },
)]
fn malformed_files_fail_to_parse(text: &str) {
    assert!(matches!(parse(text), Err(ConfigError::Parse(..))));
}

#[test]
fn blank_client_id_counts_as_missing() {
    let file = parse("[rpc]\nclient_id = \"  \"").unwrap();
    assert!(matches!(file.client_id(), Err(ConfigError::MissingClientId)));
}

#[test]
fn out_of_range_priority_is_kept_for_the_poller_to_skip() {
    let file = parse("[[identity]]\nkey = \"RMCJ\"\ncode = \"1\"\npriority = 9").unwrap();
    let settings = file.poll_settings().unwrap();
    assert_eq!(settings.identities.len(), 1);
    assert!(settings.identities[0].validate().is_err());
}

#[test]
fn load_reads_file_and_tolerates_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let missing = ConfigFile::load(&path).unwrap();
    assert!(missing.identities.is_empty());

    std::fs::write(&path, FULL).unwrap();
    let loaded = ConfigFile::load(&path).unwrap();
    assert_eq!(loaded.identities.len(), 2);
}
