//! Round controller: the turn/round state machine.
//!
//! The controller owns the live [`RoundState`] and is the only thing that
//! mutates it. Computer moves are never applied inside the transition that
//! makes them due. Instead the transition hands back a [`ScheduledMove`]
//! ticket; the caller waits out the ticket's delay and passes it to
//! [`RoundController::run_scheduled`], which drops it if the round moved on
//! in the meantime.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::heuristic::{Pick, heuristic_move};
use super::round::{Phase, RoundState};
use super::rules::Outcome;
use super::search::best_move;
use super::{Board, Mark};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Strength of the computer opponent.
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
pub enum Difficulty {
    /// Greedy one-ply heuristic.
    Easy,
    /// Exhaustive minimax.
    #[default]
    Hard,
}

/// Who plays the non-human side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentMode {
    /// A second human.
    Human,
    /// Computer using the heuristic engine.
    ComputerEasy,
    /// Computer using the search engine.
    ComputerHard,
}

/// Construction-time settings for a [`RoundController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Whether the computer plays `computer_mark`.
    pub opponent_enabled: bool,
    /// Engine used by the computer and for hints.
    pub difficulty: Difficulty,
    /// Mark the computer plays.
    pub computer_mark: Mark,
    /// Mark that opens the first round.
    pub starting_mark: Mark,
    /// Pause before a computer move is applied.
    pub computer_delay: Duration,
    /// Seed for the easy opponent's random picks; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            opponent_enabled: true,
            difficulty: Difficulty::Hard,
            computer_mark: Mark::O,
            starting_mark: Mark::X,
            computer_delay: Duration::from_millis(480),
            seed: None,
        }
    }
}

/// Ticket for a computer move that is due after `delay`.
///
/// The ticket doubles as its own cancellation token: it is only honoured if
/// the round, the move count and the mark to move are all unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMove {
    round_id: u64,
    ply: usize,
    mark: Mark,
    delay: Duration,
}

impl ScheduledMove {
    /// Mark the computer will play.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// How long the caller should wait before firing the ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Result of an accepted transition, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// False only for reports built from a rejected command.
    pub accepted: bool,
    /// The move that was applied, if any.
    pub mv: Option<Move>,
    /// Board outcome after the transition.
    pub outcome: Outcome,
    /// Mark to move next; `None` once the round is over.
    pub next_turn: Option<Mark>,
    /// Computer move now due, if any.
    pub scheduled: Option<ScheduledMove>,
}

/// Turn/round state machine with an optional computer opponent.
#[derive(Debug)]
pub struct RoundController {
    state: RoundState,
    next_starting: Mark,
    opponent_enabled: bool,
    difficulty: Difficulty,
    computer_mark: Mark,
    delay: Duration,
    round_id: u64,
    rng: StdRng,
}

impl RoundController {
    /// Creates a controller in the `Idle` phase.
    #[instrument]
    pub fn new(settings: ControllerSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            state: RoundState::idle(settings.starting_mark),
            next_starting: settings.starting_mark,
            opponent_enabled: settings.opponent_enabled,
            difficulty: settings.difficulty,
            computer_mark: settings.computer_mark,
            delay: settings.computer_delay,
            round_id: 0,
            rng,
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Read access
    // ─────────────────────────────────────────────────────────

    /// Copy of the live round state.
    pub fn snapshot(&self) -> RoundState {
        self.state.clone()
    }

    /// Borrow of the live round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Copy of the live board.
    pub fn board(&self) -> Board {
        *self.state.board()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Mark to move.
    pub fn turn(&self) -> Mark {
        self.state.turn()
    }

    /// Mark that will open the next round.
    pub fn starting_mark(&self) -> Mark {
        self.next_starting
    }

    /// Mark the computer plays when enabled.
    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    /// Configured difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Who plays the non-human side.
    pub fn mode(&self) -> OpponentMode {
        match (self.opponent_enabled, self.difficulty) {
            (false, _) => OpponentMode::Human,
            (true, Difficulty::Easy) => OpponentMode::ComputerEasy,
            (true, Difficulty::Hard) => OpponentMode::ComputerHard,
        }
    }

    /// True if `mark` is played by the computer.
    pub fn is_computer(&self, mark: Mark) -> bool {
        self.opponent_enabled && mark == self.computer_mark
    }

    /// Report describing the current state after a rejected command.
    pub fn rejection(&self) -> MoveReport {
        MoveReport {
            accepted: false,
            mv: None,
            outcome: self.state.outcome(),
            next_turn: self.state.next_turn(),
            scheduled: None,
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────

    /// Starts a new round opened by `starting_mark`.
    ///
    /// `starting_mark` also becomes the opener of later rounds. Any
    /// outstanding ticket is invalidated.
    #[instrument(skip(self))]
    pub fn start_round(&mut self, starting_mark: Mark) -> MoveReport {
        self.next_starting = starting_mark;
        self.replace_round();
        info!(round_id = self.round_id, %starting_mark, "Round started");
        self.transition_report()
    }

    /// Starts a new round opened by the other mark.
    #[instrument(skip(self))]
    pub fn next_round(&mut self) -> MoveReport {
        self.start_round(self.next_starting.opponent())
    }

    /// Places `mark` at `index` for the side to move.
    ///
    /// # Errors
    ///
    /// - `RoundAlreadyOver` outside the `InRound` phase
    /// - `InvalidTurn` if `mark` is not to move
    /// - `IllegalMove` if the square is off the board or occupied
    ///
    /// The round is unchanged on every error.
    #[instrument(skip(self), fields(round_id = self.round_id))]
    pub fn submit_move(&mut self, index: usize, mark: Mark) -> Result<MoveReport, MoveError> {
        let action = Move::new(mark, index);
        if let Err(e) = MoveContract::pre(&self.state, &action) {
            warn!(error = %e, "Move rejected");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        let outcome = self.state.apply(action)?;

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &self.state)?;

        debug!(%action, ?outcome, "Move applied");
        if outcome.is_terminal() {
            info!(round_id = self.round_id, %outcome, "Round over");
        }

        Ok(MoveReport {
            accepted: true,
            mv: Some(action),
            outcome,
            next_turn: self.state.next_turn(),
            scheduled: self.schedule_if_due(),
        })
    }

    /// Flips which mark opens the next round.
    ///
    /// If the current round has no moves yet, the new opener also takes the
    /// first move of this round. Once a move is on the board the live turn is
    /// left alone.
    #[instrument(skip(self))]
    pub fn swap_starting(&mut self) -> MoveReport {
        self.next_starting = self.next_starting.opponent();
        if self.state.is_active() && self.state.history().is_empty() {
            self.state.reassign_opener(self.next_starting);
            debug!(opener = %self.next_starting, "Opener of current round swapped");
        }
        info!(next_starting = %self.next_starting, "Starting mark swapped");
        self.transition_report()
    }

    /// Empties the board and restarts play with the configured opener.
    ///
    /// Scores live outside the controller and are untouched. Any outstanding
    /// ticket is invalidated.
    #[instrument(skip(self))]
    pub fn clear_board(&mut self) -> MoveReport {
        self.replace_round();
        info!(round_id = self.round_id, "Board cleared");
        self.transition_report()
    }

    /// Suggests a move for `for_mark` without touching the round.
    ///
    /// # Errors
    ///
    /// `HintUnavailable` if the round is not active, the computer is to move,
    /// or there is no legal move.
    #[instrument(skip(self))]
    pub fn request_hint(&self, for_mark: Mark) -> Result<usize, MoveError> {
        if !self.state.is_active() || self.is_computer(self.state.turn()) {
            debug!("Hint refused");
            return Err(MoveError::HintUnavailable);
        }
        let board = self.board();
        let hint = match self.difficulty {
            Difficulty::Hard => best_move(&board, for_mark),
            Difficulty::Easy => heuristic_move(&board, for_mark, Pick::First),
        };
        hint.ok_or(MoveError::HintUnavailable)
    }

    /// Enables or disables the computer and sets its difficulty.
    ///
    /// The report carries a ticket if the computer is now due to move.
    #[instrument(skip(self))]
    pub fn configure(&mut self, opponent_enabled: bool, difficulty: Difficulty) -> MoveReport {
        self.opponent_enabled = opponent_enabled;
        self.difficulty = difficulty;
        info!(mode = ?self.mode(), "Opponent configured");
        self.transition_report()
    }

    /// Fires a ticket issued earlier.
    ///
    /// Returns `Ok(None)` when the ticket is stale: a new round or clear
    /// happened, a move was made since, the round ended, or the computer was
    /// switched off.
    #[instrument(skip(self), fields(round_id = self.round_id))]
    pub fn run_scheduled(
        &mut self,
        ticket: ScheduledMove,
    ) -> Result<Option<MoveReport>, MoveError> {
        let current = ticket.round_id == self.round_id
            && ticket.ply == self.state.history().len()
            && self.state.is_active()
            && self.state.turn() == ticket.mark
            && self.is_computer(ticket.mark);
        if !current {
            debug!(?ticket, "Dropping stale computer move");
            return Ok(None);
        }
        self.play_computer(ticket.mark).map(Some)
    }

    /// Makes the computer move right away if it is enabled and to move.
    #[instrument(skip(self))]
    pub fn play_computer_now(&mut self) -> Result<Option<MoveReport>, MoveError> {
        let mark = self.state.turn();
        if !self.state.is_active() || !self.is_computer(mark) {
            return Ok(None);
        }
        self.play_computer(mark).map(Some)
    }

    // ─────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────

    fn replace_round(&mut self) {
        self.round_id += 1;
        self.state = RoundState::start(self.next_starting);
    }

    fn transition_report(&self) -> MoveReport {
        MoveReport {
            accepted: true,
            mv: None,
            outcome: self.state.outcome(),
            next_turn: self.state.next_turn(),
            scheduled: self.schedule_if_due(),
        }
    }

    fn schedule_if_due(&self) -> Option<ScheduledMove> {
        let mark = self.state.next_turn()?;
        self.is_computer(mark).then(|| {
            debug!(%mark, delay = ?self.delay, "Computer move scheduled");
            ScheduledMove {
                round_id: self.round_id,
                ply: self.state.history().len(),
                mark,
                delay: self.delay,
            }
        })
    }

    fn play_computer(&mut self, mark: Mark) -> Result<MoveReport, MoveError> {
        let board = self.board();
        let choice = match self.difficulty {
            Difficulty::Hard => best_move(&board, mark),
            Difficulty::Easy => heuristic_move(&board, mark, Pick::Random(&mut self.rng)),
        };
        // An active round always has an empty square.
        let index = choice.ok_or(MoveError::RoundAlreadyOver)?;
        debug!(%mark, index, difficulty = %self.difficulty, "Computer chose move");
        self.submit_move(index, mark)
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}
