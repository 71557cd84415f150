//! Tests for the JSON file key/value store.

use unbeatable::JsonFileStore;
use unbeatable_tictactoe::{HUMAN_WINS_KEY, KeyValueStore, Player, ScoreRecord, Scoreboard};

#[test]
fn test_missing_file_opens_empty_and_is_not_created() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scores.json");

    let store = JsonFileStore::open(&path).expect("Open failed");
    assert_eq!(store.get("anything").unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scores.json");

    let mut store = JsonFileStore::open(&path).expect("Open failed");
    store.set("a", "1".to_string()).unwrap();
    store.set("b", "2".to_string()).unwrap();
    store.remove("a").unwrap();

    let reopened = JsonFileStore::open(&path).expect("Reopen failed");
    assert_eq!(reopened.get("a").unwrap(), None);
    assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_remove_missing_key_is_ok() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = JsonFileStore::open(dir.path().join("scores.json")).expect("Open failed");
    assert!(store.remove("nothing").is_ok());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "not json").unwrap();

    let err = JsonFileStore::open(&path).expect_err("Corrupt file");
    assert!(err.message.contains("Failed to parse"));
}

#[test]
fn test_scoreboard_over_file_persists_wins() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scores.json");

    {
        let mut scoreboard = Scoreboard::new(JsonFileStore::open(&path).unwrap());
        scoreboard.record_win(Player::Computer).unwrap();
        scoreboard.record_win(Player::Human).unwrap();
    }

    let scoreboard = Scoreboard::new(JsonFileStore::open(&path).unwrap());
    let tally = scoreboard.tally().unwrap();
    assert_eq!(*tally.computer_wins(), 1);
    assert_eq!(*tally.human_wins(), 1);
    assert_eq!(
        scoreboard.store().get(HUMAN_WINS_KEY).unwrap().as_deref(),
        Some("1")
    );
}
