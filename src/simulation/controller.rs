use log::debug;

use crate::ai::{Agent, MoveChoice, MoveEvent};
use crate::error::SimulationError;
use crate::game::{Board, BoardConfig, MatchOutcome, MatchPhase, Player};

use super::events::{EventSink, MatchEvent};

/// Summary of one finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub moves: usize,
    pub blocked_moves: usize,
    pub central_moves: usize,
}

/// Runs one match between two agents on a board it owns.
pub struct MatchController {
    board: Board,
    agents: [Box<dyn Agent>; 2],
    phase: MatchPhase,
    last_move: Option<MoveChoice>,
    moves: usize,
    blocked_moves: usize,
    central_moves: usize,
}

impl MatchController {
    /// Fresh match on an empty board; `first` moves first.
    pub fn new(config: BoardConfig, first: Box<dyn Agent>, second: Box<dyn Agent>) -> Self {
        MatchController {
            board: Board::with_config(config),
            agents: [first, second],
            phase: MatchPhase::initial(),
            last_move: None,
            moves: 0,
            blocked_moves: 0,
            central_moves: 0,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<MoveChoice> {
        self.last_move
    }

    pub fn agent_name(&self, player: Player) -> &str {
        self.agents[player.index()].name()
    }

    /// Advance by one phase transition and return the new phase. Terminal
    /// phases are returned unchanged.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> Result<MatchPhase, SimulationError> {
        match self.phase {
            MatchPhase::AwaitingMove(player) => {
                if self.board.is_full() {
                    // Only reachable on a board with no cells at all
                    self.finish(MatchPhase::Draw, sink);
                } else {
                    self.play_turn(player, sink)?;
                }
            }
            MatchPhase::MoveApplied { .. } => {
                let next = self.phase.resolve(&self.board);
                self.finish(next, sink);
            }
            MatchPhase::Won(_) | MatchPhase::Draw => {}
        }
        Ok(self.phase)
    }

    fn play_turn(&mut self, player: Player, sink: &mut dyn EventSink) -> Result<(), SimulationError> {
        let choice = self.agents[player.index()].choose_move(&mut self.board, player)?;
        self.board
            .drop_piece(choice.column, player)
            .map_err(|source| SimulationError::IllegalMove {
                player,
                column: choice.column,
                source,
            })?;
        debug!(
            "{player} ({}) plays column {} [{:?}]",
            self.agents[player.index()].name(),
            choice.column,
            choice.reason
        );

        self.moves += 1;
        for event in choice.events(self.board.center_column()) {
            match event {
                MoveEvent::BlockedOpponent => {
                    self.blocked_moves += 1;
                    sink.record(MatchEvent::BlockedMove(player));
                }
                MoveEvent::PlayedCentralColumn => {
                    self.central_moves += 1;
                    sink.record(MatchEvent::CentralColumnPlayed(player));
                }
            }
        }

        self.last_move = Some(choice);
        self.phase = MatchPhase::MoveApplied {
            player,
            column: choice.column,
        };
        Ok(())
    }

    fn finish(&mut self, next: MatchPhase, sink: &mut dyn EventSink) {
        match next {
            MatchPhase::Won(player) => sink.record(MatchEvent::PlayerWon(player)),
            MatchPhase::Draw => sink.record(MatchEvent::Draw),
            _ => {}
        }
        self.phase = next;
    }

    /// Play the match to completion.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> Result<MatchReport, SimulationError> {
        self.run_observed(sink, |_| {})
    }

    /// Play the match to completion, handing the board to `observer` after
    /// every applied move.
    pub fn run_observed<F>(
        &mut self,
        sink: &mut dyn EventSink,
        mut observer: F,
    ) -> Result<MatchReport, SimulationError>
    where
        F: FnMut(&Board),
    {
        loop {
            let phase = self.step(sink)?;
            if let MatchPhase::MoveApplied { .. } = phase {
                observer(&self.board);
            }
            if let Some(outcome) = phase.outcome() {
                return Ok(MatchReport {
                    outcome,
                    moves: self.moves,
                    blocked_moves: self.blocked_moves,
                    central_moves: self.central_moves,
                });
            }
        }
    }
}
