//! Terminal host: mounts the controller on a single-threaded event loop.
//!
//! Input lines and the delayed computer reply are the only two event
//! sources. The reply is armed as a timer when the controller hands out a
//! [`PendingReply`]; until it fires, the controller itself rejects clicks.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};
use unbeatable_tictactoe::{
    Controller, FirstMover, KeyValueStore, PendingReply, ScoreEvent, Scoreboard, Square, Tally,
    Transition,
};

use crate::input::{HELP, Input, parse_input};

/// An interactive game session over a line-oriented terminal.
pub struct Session<S, G, W> {
    controller: Controller<Scoreboard<S>>,
    tally: Rc<RefCell<Tally>>,
    reply_delay: Duration,
    rng: G,
    out: W,
}

impl<S, G, W> Session<S, G, W>
where
    S: KeyValueStore,
    G: Rng,
    W: Write,
{
    /// Creates a session over `store`, writing the board to `out`.
    ///
    /// Counters that cannot be read are shown as zero; play goes on.
    #[instrument(skip(store, rng, out))]
    pub fn new(
        store: S,
        first_mover: FirstMover,
        reply_delay: Duration,
        rng: G,
        out: W,
    ) -> Self {
        let mut scoreboard = Scoreboard::new(store);
        let initial = scoreboard.tally().unwrap_or_else(|e| {
            warn!(error = %e, "Unreadable scores, showing zero");
            Tally::default()
        });
        let tally = Rc::new(RefCell::new(initial));

        let display = Rc::clone(&tally);
        scoreboard.subscribe(move |event| {
            let updated = match event {
                ScoreEvent::Won { tally, .. } => *tally,
                ScoreEvent::Cleared => Tally::default(),
            };
            *display.borrow_mut() = updated;
        });

        info!(%first_mover, delay = ?reply_delay, "Session created");
        Self {
            controller: Controller::new(scoreboard, first_mover),
            tally,
            reply_delay,
            rng,
            out,
        }
    }

    /// Returns the controller.
    pub fn controller(&self) -> &Controller<Scoreboard<S>> {
        &self.controller
    }

    /// Returns the output sink.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs until `quit` or end of input.
    ///
    /// A reply still pending when input ends is applied before returning.
    #[instrument(skip_all)]
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut pending: Option<PendingReply> = None;
        let mut input_closed = false;
        let timer = sleep(Duration::ZERO);
        tokio::pin!(timer);

        self.render()?;

        loop {
            if input_closed && pending.is_none() {
                info!("Input closed");
                return Ok(());
            }

            tokio::select! {
                biased;

                () = &mut timer, if pending.is_some() => {
                    if let Some(reply) = pending.take() {
                        debug!(generation = reply.generation(), "Reply timer fired");
                        self.controller.apply_computer_move(reply);
                        self.render()?;
                    }
                }

                line = lines.next_line(), if !input_closed => {
                    let Some(line) = line? else {
                        input_closed = true;
                        continue;
                    };
                    let Some(command) = parse_input(&line) else {
                        writeln!(self.out, "{}", HELP)?;
                        continue;
                    };
                    match command {
                        Input::Quit => {
                            info!("Quit requested");
                            return Ok(());
                        }
                        Input::Help => writeln!(self.out, "{}", HELP)?,
                        Input::ShowScores => self.render_scores()?,
                        Input::ClearScores => {
                            self.controller.clear_scores();
                            self.render_scores()?;
                        }
                        Input::NewGame => {
                            // Any armed reply belongs to the old board.
                            pending = None;
                            self.controller.start_new_game(&mut self.rng);
                            self.render()?;
                        }
                        Input::Cell(pos) => {
                            match self.controller.apply_human_move(pos.to_index()) {
                                Transition::Ignored(reason) => {
                                    debug!(%reason, "Click ignored");
                                    writeln!(self.out, "That cell is not available.")?;
                                }
                                Transition::ComputerToMove(reply) if self.reply_delay.is_zero() => {
                                    self.controller.apply_computer_move(reply);
                                    self.render()?;
                                }
                                Transition::ComputerToMove(reply) => {
                                    pending = Some(reply);
                                    timer.as_mut().reset(Instant::now() + self.reply_delay);
                                    self.render()?;
                                }
                                Transition::HumanToMove | Transition::GameOver(_) => {
                                    self.render()?;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Draws the board, status line and scoreboard.
    fn render(&mut self) -> Result<()> {
        let cells = self.controller.cells();
        let mut text = String::new();
        for (row, chunk) in cells.chunks(3).enumerate() {
            let drawn: Vec<String> = chunk
                .iter()
                .map(|cell| {
                    let glyph = match cell.square {
                        Square::Occupied(player) => player.mark(),
                        Square::Empty if cell.clickable => {
                            char::from_digit(cell.position.to_index() as u32 + 1, 10)
                                .unwrap_or(' ')
                        }
                        Square::Empty => ' ',
                    };
                    if cell.winning {
                        format!("[{}]", glyph)
                    } else {
                        format!(" {} ", glyph)
                    }
                })
                .collect();
            text.push_str(&drawn.join("|"));
            text.push('\n');
            if row < 2 {
                text.push_str("---+---+---\n");
            }
        }

        writeln!(self.out)?;
        write!(self.out, "{}", text)?;
        writeln!(self.out, "{}", self.controller.status())?;
        if self.controller.show_new_game() {
            writeln!(self.out, "Type n for a New Game.")?;
        }
        self.render_scores()
    }

    fn render_scores(&mut self) -> Result<()> {
        let tally = *self.tally.borrow();
        writeln!(
            self.out,
            "Human (X) {}  vs  Computer (O) {}",
            tally.human_wins(),
            tally.computer_wins()
        )?;
        Ok(())
    }
}
