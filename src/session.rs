//! Interactive play session: text commands in, board and status lines out.
//!
//! The session owns a [`RoundController`] and the [`ScoreTally`], and keeps
//! at most one pending computer move. [`run_session`] drives it from an
//! async line reader, waiting out each computer move's delay while still
//! accepting commands, so a clear or new round issued during the wait
//! cancels the move.

use crate::config::EngineConfig;
use crate::games::tictactoe::{
    Difficulty, Mark, MoveError, MoveReport, OpponentMode, Outcome, Position, RoundController,
    ScheduledMove,
};
use crate::tally::ScoreTally;
use anyhow::Result;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the human's mark at a board index (0-8).
    Place(usize),
    /// Ask for a suggested move.
    Hint,
    /// Flip who opens the next round.
    Swap,
    /// Empty the board.
    Clear,
    /// Start the next round with the other opener.
    NewRound,
    /// Zero the tally.
    ResetScores,
    /// Make the computer move now.
    ComputerNow,
    /// Turn the computer opponent on or off.
    ToggleOpponent,
    /// Change difficulty.
    SetDifficulty(Difficulty),
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// Error for unrecognised input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unknown command '{}' (type ? for help)", input)]
pub struct ParseCommandError {
    /// The offending input.
    pub input: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let command = match trimmed.as_str() {
            "h" | "hint" => Command::Hint,
            "s" | "swap" => Command::Swap,
            "c" | "clear" => Command::Clear,
            "n" | "new" => Command::NewRound,
            "r" | "reset" => Command::ResetScores,
            "a" | "ai" => Command::ComputerNow,
            "t" | "toggle" => Command::ToggleOpponent,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => {
                if let Ok(difficulty) = other.parse::<Difficulty>() {
                    Command::SetDifficulty(difficulty)
                } else if let Some(pos) = Position::from_label_or_number(other) {
                    Command::Place(pos.to_index())
                } else {
                    return Err(ParseCommandError {
                        input: s.trim().to_string(),
                    });
                }
            }
        };
        Ok(command)
    }
}

/// Stand-in deadline for delays too long to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

const HELP: &str = "Commands: 1-9 place | h hint | s swap opener | c clear | n new round | \
r reset scores | a computer moves now | t toggle computer | easy/hard | q quit";

/// One player's view of a running game.
#[derive(Debug)]
pub struct GameSession {
    controller: RoundController,
    config: EngineConfig,
    tally: ScoreTally,
    pending: Option<(ScheduledMove, Instant)>,
    json: bool,
    finished: bool,
}

impl GameSession {
    /// Creates a session; call [`GameSession::begin`] to start the first round.
    #[instrument(skip(config))]
    pub fn new(config: EngineConfig, json: bool) -> Self {
        Self {
            controller: RoundController::new(config.controller_settings()),
            config,
            tally: ScoreTally::new(),
            pending: None,
            json,
            finished: false,
        }
    }

    /// The round controller.
    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    /// Scores so far.
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// Computer move waiting to be fired, if any.
    pub fn pending(&self) -> Option<ScheduledMove> {
        self.pending.map(|(ticket, _)| ticket)
    }

    /// When the pending computer move is due. Fixed when the ticket is issued.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// True after `quit`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Starts the first round.
    pub fn begin(&mut self) -> Vec<String> {
        let report = self.controller.start_round(*self.config.starting_mark());
        let mut out = Vec::new();
        self.push_transition(report, HELP.to_string(), &mut out);
        out
    }

    /// Applies one command and returns the lines to show.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> Vec<String> {
        let mut out = Vec::new();
        match command {
            Command::Place(index) => {
                let mark = self.human_mark();
                match self.controller.submit_move(index, mark) {
                    Ok(report) => self.push_report(report, &mut out),
                    Err(e) => self.push_error(&e, &mut out),
                }
            }
            Command::Hint => match self.controller.request_hint(self.controller.turn()) {
                Ok(index) if self.json => {
                    out.push(serde_json::json!({ "hint": index }).to_string())
                }
                Ok(index) => out.push(format!("Hint: consider cell {}", index + 1)),
                Err(MoveError::HintUnavailable) if self.computer_to_move() => {
                    self.push_message("Hint disabled while the computer is to move", &mut out)
                }
                Err(_) => self.push_message("No hint available", &mut out),
            },
            Command::Swap => {
                let report = self.controller.swap_starting();
                let opener = self.config.player_name(self.controller.starting_mark());
                let note = format!("{opener} will start next round.");
                self.push_transition(report, note, &mut out);
            }
            Command::Clear => {
                let report = self.controller.clear_board();
                self.push_transition(report, "Board was cleared".to_string(), &mut out);
            }
            Command::NewRound => {
                let report = self.controller.next_round();
                let opener = self.config.player_name(self.controller.turn());
                let note = format!("New round started. {opener} starts.");
                self.push_transition(report, note, &mut out);
            }
            Command::ResetScores => {
                self.tally.reset();
                self.push_message("Scores set to zero", &mut out);
            }
            Command::ComputerNow => {
                if !self.controller.is_computer(self.controller.turn()) {
                    self.push_message("Enable the computer first, or wait for its turn", &mut out);
                } else {
                    self.pending = None;
                    match self.controller.play_computer_now() {
                        Ok(Some(report)) => self.push_report(report, &mut out),
                        Ok(None) => self.push_message("Round is over", &mut out),
                        Err(e) => self.push_error(&e, &mut out),
                    }
                }
            }
            Command::ToggleOpponent => {
                let enabled = self.controller.mode() == OpponentMode::Human;
                let report = self.controller.configure(enabled, self.controller.difficulty());
                let note = if enabled { "Computer enabled" } else { "Computer disabled" };
                self.push_transition(report, note.to_string(), &mut out);
            }
            Command::SetDifficulty(difficulty) => {
                let enabled = self.controller.mode() != OpponentMode::Human;
                let report = self.controller.configure(enabled, difficulty);
                self.push_transition(report, format!("Difficulty set to {difficulty}"), &mut out);
            }
            Command::Help => self.push_message(HELP, &mut out),
            Command::Quit => {
                info!(tally = %self.tally, "Session ended");
                self.finished = true;
                if self.json {
                    out.push(serde_json::json!({ "final": self.tally }).to_string());
                } else {
                    out.push(format!("Final score: {}", self.tally));
                }
            }
        }
        out
    }

    /// Fires a computer move whose delay has elapsed.
    #[instrument(skip(self))]
    pub fn fire(&mut self, ticket: ScheduledMove) -> Vec<String> {
        let mut out = Vec::new();
        if self.pending() == Some(ticket) {
            self.pending = None;
        }
        match self.controller.run_scheduled(ticket) {
            Ok(Some(report)) => self.push_report(report, &mut out),
            Ok(None) => debug!("Computer move cancelled"),
            Err(e) => self.push_error(&e, &mut out),
        }
        out
    }

    fn human_mark(&self) -> Mark {
        if self.controller.mode() == OpponentMode::Human {
            self.controller.turn()
        } else {
            self.controller.computer_mark().opponent()
        }
    }

    fn computer_to_move(&self) -> bool {
        self.controller.state().is_active() && self.controller.is_computer(self.controller.turn())
    }

    /// Keeps the deadline of a ticket that is already pending, so commands
    /// that leave the ticket valid do not push the computer move back.
    fn set_pending(&mut self, ticket: Option<ScheduledMove>) {
        if ticket != self.pending() {
            let now = Instant::now();
            self.pending = ticket.map(|t| {
                let deadline = now.checked_add(t.delay()).unwrap_or(now + FAR_FUTURE);
                (t, deadline)
            });
        }
    }

    fn push_report(&mut self, report: MoveReport, out: &mut Vec<String>) {
        if report.mv.is_some() && report.outcome.is_terminal() {
            self.tally.record(&report.outcome);
        }
        self.set_pending(report.scheduled);

        if self.json {
            match serde_json::to_string(&report) {
                Ok(line) => out.push(line),
                Err(e) => warn!(error = %e, "Failed to serialise report"),
            }
            return;
        }
        if let Some(mv) = report.mv {
            out.push(format!(
                "{} placed {} in cell {}",
                self.config.player_name(mv.mark),
                mv.mark,
                mv.index + 1
            ));
        }
        self.push_state(out);
    }

    /// Round-level transition: no move, but the state may have changed.
    fn push_transition(&mut self, report: MoveReport, note: String, out: &mut Vec<String>) {
        self.set_pending(report.scheduled);
        if self.json {
            match serde_json::to_string(&report) {
                Ok(line) => out.push(line),
                Err(e) => warn!(error = %e, "Failed to serialise report"),
            }
            return;
        }
        out.push(note);
        self.push_state(out);
    }

    fn push_message(&self, text: &str, out: &mut Vec<String>) {
        if self.json {
            out.push(serde_json::json!({ "message": text }).to_string());
        } else {
            out.push(text.to_string());
        }
    }

    fn push_error(&self, error: &MoveError, out: &mut Vec<String>) {
        if self.json {
            let payload = serde_json::json!({
                "report": self.controller.rejection(),
                "error": error.to_string(),
            });
            out.push(payload.to_string());
        } else {
            out.push(error.to_string());
        }
    }

    fn push_state(&self, out: &mut Vec<String>) {
        if self.json {
            return;
        }
        out.push(self.controller.board().display());
        let state = self.controller.state();
        let status = match state.outcome() {
            Outcome::Win { mark, line } => format!(
                "{} wins on {line}! ({})",
                self.config.player_name(mark),
                self.tally
            ),
            Outcome::Draw => format!("Draw ({})", self.tally),
            Outcome::InProgress => format!("Turn: {}", self.config.player_name(state.turn())),
        };
        out.push(status);
    }
}

/// Runs a session until `quit` or end of input.
///
/// While a computer move is pending the loop races its deadline against the
/// next input line; whichever comes first is handled. The deadline is set
/// when the ticket is issued, so other input never delays the move.
pub async fn run_session<R, W>(session: &mut GameSession, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write_lines(&mut output, session.begin()).await?;

    while !session.is_finished() {
        let line = match session.pending().zip(session.deadline()) {
            Some((ticket, _)) if ticket.delay().is_zero() => {
                let out = session.fire(ticket);
                write_lines(&mut output, out).await?;
                continue;
            }
            Some((ticket, deadline)) => {
                tokio::select! {
                    biased;
                    _ = tokio::time::sleep_until(deadline) => {
                        let out = session.fire(ticket);
                        write_lines(&mut output, out).await?;
                        continue;
                    }
                    line = lines.next_line() => line?,
                }
            }
            None => lines.next_line().await?,
        };

        let Some(line) = line else {
            debug!("Input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let out = match line.parse::<Command>() {
            Ok(command) => session.handle(command),
            Err(e) => vec![e.to_string()],
        };
        write_lines(&mut output, out).await?;
    }

    Ok(())
}

async fn write_lines<W: AsyncWrite + Unpin>(output: &mut W, lines: Vec<String>) -> Result<()> {
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}
