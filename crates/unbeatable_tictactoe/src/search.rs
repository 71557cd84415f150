//! Exhaustive minimax search for the computer's move.
//!
//! The game tree of a 3x3 board is small enough to walk completely: at most
//! nine plies, and far fewer nodes than `9!` once finished lines cut branches
//! short. No pruning, no depth limit, no transposition table. Scores are
//! always from the computer's point of view.
//!
//! The search places and lifts marks on a private copy of the board, so the
//! caller's board is only ever borrowed immutably.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::position::Position;
use crate::rules::has_line;
use crate::types::{Board, Player, Square};

/// Minimax value of a position, from the computer's point of view.
pub type Score = i32;

/// The computer can force a win.
pub const COMPUTER_WINS: Score = 10;

/// Perfect play from both sides ends in a draw.
pub const DRAWN: Score = 0;

/// The human can force a win.
pub const HUMAN_WINS: Score = -10;

/// The engine's choice for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMove {
    /// Cell to play.
    pub position: Position,
    /// Minimax value after playing `position`.
    pub value: Score,
    /// Number of search nodes visited.
    pub nodes: u64,
}

/// Returns the best move for `to_move`.
///
/// The computer maximizes the score and the human minimizes it. When
/// several cells share the best score the lowest index wins, which keeps
/// the choice reproducible.
///
/// Returns `None` when the position is already decided (a line exists or
/// the board is full). Callers are expected to check the outcome first.
#[instrument(skip(board), fields(to_move = ?to_move))]
pub fn best_move(board: &Board, to_move: Player) -> Option<BestMove> {
    let mut search = Search::new(board);
    let (position, value) = search.minimax(to_move);
    let position = position?;

    debug!(
        position = %position,
        value,
        nodes = search.nodes,
        "Search complete"
    );

    Some(BestMove {
        position,
        value,
        nodes: search.nodes,
    })
}

/// Returns the minimax value of `board` with `to_move` on turn.
pub fn evaluate(board: &Board, to_move: Player) -> Score {
    Search::new(board).minimax(to_move).1
}

struct Search {
    board: Board,
    nodes: u64,
}

impl Search {
    fn new(board: &Board) -> Self {
        Self {
            board: *board,
            nodes: 0,
        }
    }

    fn minimax(&mut self, to_move: Player) -> (Option<Position>, Score) {
        self.nodes += 1;

        if has_line(&self.board, Player::Human) {
            return (None, HUMAN_WINS);
        }
        if has_line(&self.board, Player::Computer) {
            return (None, COMPUTER_WINS);
        }

        let mut best: Option<(Position, Score)> = None;
        for pos in Position::ALL {
            if !self.board.is_empty(pos) {
                continue;
            }

            self.board.set(pos, Square::Occupied(to_move));
            let (_, value) = self.minimax(to_move.opponent());
            self.board.set(pos, Square::Empty);

            let improves = match best {
                None => true,
                Some((_, current)) => match to_move {
                    Player::Computer => value > current,
                    Player::Human => value < current,
                },
            };
            if improves {
                best = Some((pos, value));
            }
        }

        match best {
            Some((pos, value)) => (Some(pos), value),
            // No empty square and no line.
            None => (None, DRAWN),
        }
    }
}
