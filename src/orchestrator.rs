//! Rounds between two players, without delays or a human in the loop.

use crate::games::tictactoe::{
    ControllerSettings, Mark, MoveError, Outcome, RoundController,
};
use crate::players::Player;
use crate::tally::ScoreTally;
use tracing::{debug, info, instrument};

/// Plays rounds between two players and keeps the tally.
pub struct Orchestrator {
    controller: RoundController,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    tally: ScoreTally,
}

impl Orchestrator {
    /// Creates an orchestrator; X opens the first round.
    pub fn new(player_x: Box<dyn Player>, player_o: Box<dyn Player>) -> Self {
        let controller = RoundController::new(ControllerSettings {
            opponent_enabled: false,
            ..ControllerSettings::default()
        });
        Self {
            controller,
            player_x,
            player_o,
            tally: ScoreTally::new(),
        }
    }

    /// Tally so far.
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// Plays one round opened by `starting_mark` to completion.
    #[instrument(skip(self))]
    pub fn play_round(&mut self, starting_mark: Mark) -> Result<Outcome, MoveError> {
        self.controller.start_round(starting_mark);

        loop {
            let mark = self.controller.turn();
            let board = self.controller.board();
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let index = player.choose(&board, mark).ok_or(MoveError::RoundAlreadyOver)?;
            debug!(player = player.name(), %mark, index, "Player moved");

            let report = self.controller.submit_move(index, mark)?;
            if report.outcome.is_terminal() {
                self.tally.record(&report.outcome);
                return Ok(report.outcome);
            }
        }
    }

    /// Plays `rounds` rounds, alternating the opener, and returns the tally.
    #[instrument(skip(self))]
    pub fn run(&mut self, rounds: u32) -> Result<ScoreTally, MoveError> {
        let mut opener = Mark::X;
        for round in 0..rounds {
            let outcome = self.play_round(opener)?;
            debug!(round, %outcome, "Round finished");
            opener = opener.opponent();
        }
        info!(
            x = self.player_x.name(),
            o = self.player_o.name(),
            tally = %self.tally,
            "Self-play finished"
        );
        Ok(self.tally)
    }
}
