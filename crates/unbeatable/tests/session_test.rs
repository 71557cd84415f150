//! Tests for the terminal host event loop.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use unbeatable::Session;
use unbeatable_tictactoe::{
    COMPUTER_WINS_KEY, FirstMover, HUMAN_WINS_KEY, KeyValueStore, MemoryStore, Phase, Player,
    Position, Square,
};

type TestSession = Session<MemoryStore, StdRng, Vec<u8>>;

fn session(delay: Duration) -> TestSession {
    Session::new(
        MemoryStore::new(),
        FirstMover::Human,
        delay,
        StdRng::seed_from_u64(42),
        Vec::new(),
    )
}

fn output(session: &TestSession) -> String {
    String::from_utf8(session.output().clone()).expect("UTF-8 output")
}

#[tokio::test]
async fn test_not_started_until_new_game() {
    let mut session = session(Duration::ZERO);
    session.run(&b"5\n"[..]).await.unwrap();

    assert_eq!(session.controller().phase(), Phase::NotStarted);
    let text = output(&session);
    assert!(text.contains("Click the New Game button"));
    assert!(text.contains("That cell is not available."));
}

#[tokio::test]
async fn test_immediate_reply_without_delay() {
    let mut session = session(Duration::ZERO);
    session.run(&b"n\n5\n"[..]).await.unwrap();

    let board = session.controller().board();
    assert_eq!(board.get(Position::Center), Square::Occupied(Player::Human));
    assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::Computer));
    assert_eq!(session.controller().phase(), Phase::HumanToMove);
    assert!(output(&session).contains("It's the Human's (X) turn"));
}

#[tokio::test]
async fn test_clicks_rejected_while_reply_pending() {
    let mut session = session(Duration::from_millis(50));
    // "1" arrives before the reply timer fires.
    session.run(&b"n\n5\n1\n"[..]).await.unwrap();

    let board = session.controller().board();
    assert_eq!(board.get(Position::Center), Square::Occupied(Player::Human));
    assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::Computer));
    assert_eq!(board.count(Player::Human), 1);

    let text = output(&session);
    assert!(text.contains("The Computer (O) is thinking..."));
    assert!(text.contains("That cell is not available."));
}

#[tokio::test]
async fn test_new_game_drops_pending_reply() {
    let mut session = session(Duration::from_millis(50));
    session.run(&b"n\n5\nn\n"[..]).await.unwrap();

    assert_eq!(session.controller().generation(), 2);
    assert_eq!(session.controller().phase(), Phase::HumanToMove);
    assert_eq!(session.controller().board().empty_positions().count(), 9);
}

#[tokio::test]
async fn test_quit_stops_reading() {
    let mut session = session(Duration::ZERO);
    session.run(&b"n\nq\n5\n"[..]).await.unwrap();

    assert_eq!(session.controller().board().empty_positions().count(), 9);
}

#[tokio::test]
async fn test_unknown_input_prints_help_and_scores_show() {
    let mut session = session(Duration::ZERO);
    session.run(&b"dance\ns\n"[..]).await.unwrap();

    let text = output(&session);
    assert!(text.contains(unbeatable::HELP));
    assert!(text.contains("Human (X) 0  vs  Computer (O) 0"));
}

#[tokio::test]
async fn test_corrupt_scores_do_not_block_play() {
    let mut store = MemoryStore::new();
    store.set(HUMAN_WINS_KEY, "x".to_string()).unwrap();
    store.set(COMPUTER_WINS_KEY, "3".to_string()).unwrap();

    let mut session = Session::new(
        store,
        FirstMover::Human,
        Duration::ZERO,
        StdRng::seed_from_u64(42),
        Vec::new(),
    );
    session.run(&b"n\n5\n"[..]).await.unwrap();

    let board = session.controller().board();
    assert_eq!(board.get(Position::Center), Square::Occupied(Player::Human));
    assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::Computer));
    assert!(output(&session).contains("Human (X) 0  vs  Computer (O) 0"));
}
