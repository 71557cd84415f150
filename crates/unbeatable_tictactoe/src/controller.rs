//! Game controller: the authoritative board and the turn state machine.
//!
//! The controller is driven by one input event at a time. A human move that
//! leaves the game open does not trigger the reply directly; it hands the
//! host a [`PendingReply`] to fire later on its own task queue. Until that
//! token is applied the controller sits in [`Phase::ComputerToMove`] and
//! rejects further human input.
//!
//! Every new game bumps a generation counter. A token issued in an earlier
//! generation is stale and is discarded when it finally fires.

use derive_more::Display;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::outcome::Outcome;
use crate::position::Position;
use crate::rules::{self, WinLine, has_line, is_full};
use crate::scoreboard::ScoreRecord;
use crate::search::best_move;
use crate::types::{Board, Player, Square};
use crate::view::{CellView, StatusMessage};

/// Delay the reference host waits before revealing the computer's reply.
pub const DEFAULT_REPLY_DELAY: std::time::Duration = std::time::Duration::from_millis(1000);

/// Turn state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Waiting for the first "new game".
    #[display("not started")]
    NotStarted,
    /// The human may click an empty cell.
    #[display("human to move")]
    HumanToMove,
    /// A computer reply is scheduled but not yet applied.
    #[display("computer to move")]
    ComputerToMove,
    /// The board is decided; only "new game" does anything.
    #[display("game over")]
    GameOver,
}

/// Who opens a new game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FirstMover {
    /// A fair coin decides each game.
    #[default]
    Random,
    /// The human always opens.
    Human,
    /// The computer always opens, on a random cell.
    Computer,
}

/// Token for a scheduled computer reply.
///
/// Issued when a human move leaves the game open; redeem it with
/// [`Controller::apply_computer_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingReply {
    generation: u64,
}

impl PendingReply {
    /// Game generation the token was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why an input was ignored. Ignored inputs never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// The index is not a cell.
    #[display("cell index {_0} is off the board")]
    OutOfRange(usize),
    /// The cell already holds a mark.
    #[display("{_0} is already occupied")]
    Occupied(Position),
    /// Human input while the controller is in another phase.
    #[display("human input while {_0}")]
    NotHumansTurn(Phase),
    /// A reply token from an earlier game, or one already applied.
    #[display("stale reply from generation {issued} (current {current}, {phase})")]
    StaleReply {
        /// Generation the token carries.
        issued: u64,
        /// Controller's generation.
        current: u64,
        /// Controller's phase when the token fired.
        phase: Phase,
    },
}

/// Result of feeding an event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Ignored(Rejection),
    /// The human is on turn.
    HumanToMove,
    /// Schedule this reply.
    ComputerToMove(PendingReply),
    /// The game just ended.
    GameOver(Outcome),
}

/// Owns the board and sequences turns between the human and the engine.
#[derive(Debug)]
pub struct Controller<R> {
    board: Board,
    phase: Phase,
    generation: u64,
    first_mover: FirstMover,
    scores: R,
}

impl<R: ScoreRecord> Controller<R> {
    /// Creates a controller waiting for its first game.
    #[instrument(skip(scores))]
    pub fn new(scores: R, first_mover: FirstMover) -> Self {
        info!(%first_mover, "Creating Controller");
        Self {
            board: Board::new(),
            phase: Phase::NotStarted,
            generation: 0,
            first_mover,
            scores,
        }
    }

    /// Replaces the board with an empty one and opens a new game.
    ///
    /// If the computer opens, its mark goes on a uniformly random cell
    /// rather than the searched move, so games vary. Any reply still
    /// pending from the previous game becomes stale.
    #[instrument(skip(self, rng), fields(generation = self.generation + 1))]
    pub fn start_new_game<G: Rng>(&mut self, rng: &mut G) -> Transition {
        self.board = Board::new();
        self.generation += 1;

        let opener = match self.first_mover {
            FirstMover::Human => Player::Human,
            FirstMover::Computer => Player::Computer,
            FirstMover::Random if rng.random_bool(0.5) => Player::Computer,
            FirstMover::Random => Player::Human,
        };

        if opener == Player::Computer {
            let cells = Position::valid_moves(&self.board);
            if let Some(&pos) = cells.choose(rng) {
                self.board.set(pos, Square::Occupied(Player::Computer));
                debug!(position = %pos, "Computer opened at random");
            }
        }

        info!(%opener, "New game started");
        self.phase = Phase::HumanToMove;
        Transition::HumanToMove
    }

    /// Plays the human's mark at `index` (0-8).
    ///
    /// Ignored unless the human is on turn and the cell is empty. If the
    /// game stays open the controller moves to [`Phase::ComputerToMove`]
    /// and returns the reply token to schedule.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply_human_move(&mut self, index: usize) -> Transition {
        if self.phase != Phase::HumanToMove {
            return self.ignore(Rejection::NotHumansTurn(self.phase));
        }
        let Some(pos) = Position::from_index(index) else {
            return self.ignore(Rejection::OutOfRange(index));
        };
        if !self.board.is_empty(pos) {
            return self.ignore(Rejection::Occupied(pos));
        }

        self.board.set(pos, Square::Occupied(Player::Human));
        debug!(position = %pos, "Human moved");

        if let Some(outcome) = self.conclude(Player::Human) {
            return Transition::GameOver(outcome);
        }

        self.phase = Phase::ComputerToMove;
        Transition::ComputerToMove(PendingReply {
            generation: self.generation,
        })
    }

    /// Applies the engine's reply for a previously issued token.
    ///
    /// Tokens from an earlier game, or tokens already redeemed, are
    /// discarded without touching the board.
    #[instrument(skip(self), fields(phase = %self.phase, generation = self.generation))]
    pub fn apply_computer_move(&mut self, reply: PendingReply) -> Transition {
        if reply.generation != self.generation || self.phase != Phase::ComputerToMove {
            return self.ignore(Rejection::StaleReply {
                issued: reply.generation,
                current: self.generation,
                phase: self.phase,
            });
        }

        let Some(best) = best_move(&self.board, Player::Computer) else {
            // Unreachable while conclude() runs after every move.
            error!(board = %self.board.display(), "Engine asked to move on a decided board");
            self.phase = Phase::GameOver;
            return Transition::GameOver(self.outcome());
        };

        self.board
            .set(best.position, Square::Occupied(Player::Computer));
        debug!(position = %best.position, value = best.value, "Computer moved");

        if let Some(outcome) = self.conclude(Player::Computer) {
            return Transition::GameOver(outcome);
        }

        self.phase = Phase::HumanToMove;
        Transition::HumanToMove
    }

    /// Removes both win counters. The board is untouched.
    #[instrument(skip(self))]
    pub fn clear_scores(&mut self) {
        if let Err(e) = self.scores.clear_scores() {
            warn!(error = %e, "Failed to clear scores");
        }
    }

    /// Ends the game if `mover` just won or filled the board.
    fn conclude(&mut self, mover: Player) -> Option<Outcome> {
        let outcome = if has_line(&self.board, mover) {
            Outcome::Win(mover)
        } else if is_full(&self.board) {
            Outcome::Draw
        } else {
            return None;
        };

        self.phase = Phase::GameOver;
        info!(%outcome, "Game over");

        if let Some(winner) = outcome.winner()
            && let Err(e) = self.scores.record_win(winner)
        {
            warn!(error = %e, %winner, "Failed to record win");
        }
        Some(outcome)
    }

    fn ignore(&self, reason: Rejection) -> Transition {
        debug!(%reason, "Input ignored");
        Transition::Ignored(reason)
    }
}

impl<R> Controller<R> {
    /// Returns the authoritative board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the outcome of the current board.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(&self.board)
    }

    /// Returns the completed line, if any.
    pub fn winning_line(&self) -> Option<WinLine> {
        rules::winning_line(&self.board)
    }

    /// Returns the number of games started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the opening policy.
    pub fn first_mover(&self) -> FirstMover {
        self.first_mover
    }

    /// Returns the score keeper.
    pub fn scores(&self) -> &R {
        &self.scores
    }

    /// Returns the score keeper mutably, e.g. to subscribe to it.
    pub fn scores_mut(&mut self) -> &mut R {
        &mut self.scores
    }

    /// Returns the render state of all nine cells.
    pub fn cells(&self) -> [CellView; 9] {
        let line = self.winning_line();
        Position::ALL.map(|position| {
            let square = self.board.get(position);
            CellView {
                position,
                square,
                clickable: self.phase == Phase::HumanToMove && square == Square::Empty,
                winning: line.is_some_and(|l| l.contains(position)),
            }
        })
    }

    /// Returns the status line for the current state.
    pub fn status(&self) -> StatusMessage {
        match self.phase {
            Phase::NotStarted => StatusMessage::NewGame,
            Phase::HumanToMove => StatusMessage::HumanTurn,
            Phase::ComputerToMove => StatusMessage::ComputerTurn,
            Phase::GameOver => match self.outcome() {
                Outcome::Win(Player::Human) => StatusMessage::HumanWins,
                Outcome::Win(Player::Computer) => StatusMessage::ComputerWins,
                Outcome::Draw | Outcome::InProgress => StatusMessage::Draw,
            },
        }
    }

    /// Whether the "New Game" control should be offered.
    pub fn show_new_game(&self) -> bool {
        matches!(self.phase, Phase::NotStarted | Phase::GameOver)
    }
}
