//! Tests for the persistent scoreboard.

use std::cell::RefCell;
use std::rc::Rc;

use unbeatable_tictactoe::{
    COMPUTER_WINS_KEY, HUMAN_WINS_KEY, KeyValueStore, MemoryStore, Player, ScoreEvent,
    ScoreRecord, Scoreboard, Tally,
};

#[test]
fn test_missing_counters_read_as_zero() {
    let board = Scoreboard::new(MemoryStore::new());
    assert_eq!(board.tally().unwrap(), Tally::default());
}

#[test]
fn test_record_win_increments_the_right_counter() {
    let mut board = Scoreboard::new(MemoryStore::new());

    board.record_win(Player::Computer).unwrap();
    board.record_win(Player::Computer).unwrap();
    board.record_win(Player::Human).unwrap();

    let tally = board.tally().unwrap();
    assert_eq!(tally, Tally::new(1, 2));
    assert_eq!(tally.wins(Player::Computer), 2);
    assert_eq!(
        board.store().get(COMPUTER_WINS_KEY).unwrap().as_deref(),
        Some("2")
    );
    assert_eq!(board.store().get(HUMAN_WINS_KEY).unwrap().as_deref(), Some("1"));
}

#[test]
fn test_counters_continue_from_existing_store() {
    let mut store = MemoryStore::new();
    store.set(HUMAN_WINS_KEY, "4".to_string()).unwrap();

    let mut board = Scoreboard::new(store);
    board.record_win(Player::Human).unwrap();

    assert_eq!(*board.tally().unwrap().human_wins(), 5);
}

#[test]
fn test_clear_removes_both_keys() {
    let mut board = Scoreboard::new(MemoryStore::new());
    board.record_win(Player::Human).unwrap();
    board.record_win(Player::Computer).unwrap();

    board.clear_scores().unwrap();

    assert_eq!(board.store().get(HUMAN_WINS_KEY).unwrap(), None);
    assert_eq!(board.store().get(COMPUTER_WINS_KEY).unwrap(), None);
    assert_eq!(board.tally().unwrap(), Tally::default());
}

#[test]
fn test_corrupt_counter_is_an_error() {
    let mut store = MemoryStore::new();
    store.set(COMPUTER_WINS_KEY, "many".to_string()).unwrap();

    let mut board = Scoreboard::new(store);

    let err = board.record_win(Player::Computer).unwrap_err();
    assert!(err.message.contains(COMPUTER_WINS_KEY));
    assert!(board.tally().is_err());
}

#[test]
fn test_observers_see_every_change() {
    let mut board = Scoreboard::new(MemoryStore::new());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    board.subscribe(move |e| sink.borrow_mut().push(*e));

    board.record_win(Player::Human).unwrap();
    board.clear_scores().unwrap();

    assert_eq!(
        events.borrow().as_slice(),
        &[
            ScoreEvent::Won {
                winner: Player::Human,
                tally: Tally::new(1, 0),
            },
            ScoreEvent::Cleared,
        ]
    );
}

#[test]
fn test_failed_record_writes_nothing() {
    let mut store = MemoryStore::new();
    store.set(COMPUTER_WINS_KEY, "abc".to_string()).unwrap();

    let mut board = Scoreboard::new(store);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    board.subscribe(move |e| sink.borrow_mut().push(*e));

    assert!(board.record_win(Player::Human).is_err());

    // The readable counter was not bumped behind the caller's back.
    assert_eq!(board.store().get(HUMAN_WINS_KEY).unwrap(), None);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_won_event_carries_updated_tally() {
    let mut store = MemoryStore::new();
    store.set(HUMAN_WINS_KEY, "2".to_string()).unwrap();
    store.set(COMPUTER_WINS_KEY, "7".to_string()).unwrap();

    let mut board = Scoreboard::new(store);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    board.subscribe(move |e| sink.borrow_mut().push(*e));

    board.record_win(Player::Computer).unwrap();

    assert_eq!(
        events.borrow().as_slice(),
        &[ScoreEvent::Won {
            winner: Player::Computer,
            tally: Tally::new(2, 8),
        }]
    );
    assert_eq!(board.tally().unwrap().wins(Player::Computer), 8);
    assert_eq!(board.tally().unwrap().wins(Player::Human), 2);
}
