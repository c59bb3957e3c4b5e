use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AgentError;
use crate::game::{Board, Player};

use super::agent::{Agent, MoveChoice, MoveReason};

/// Greedy agent configuration.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GreedyConfig {
    /// Chance of skipping block/win detection and playing a random column.
    pub random_move_probability: f64,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        GreedyConfig {
            random_move_probability: 0.1,
        }
    }
}

/// Heuristic agent: block the opponent's immediate line, else complete its
/// own, else play a random legal column. A small random override keeps two
/// equal agents from repeating the same game forever.
pub struct GreedyAgent<R = StdRng> {
    config: GreedyConfig,
    rng: R,
}

impl GreedyAgent<StdRng> {
    pub fn new(config: GreedyConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: GreedyConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GreedyAgent<R> {
    pub fn with_rng(config: GreedyConfig, rng: R) -> Self {
        GreedyAgent { config, rng }
    }

    /// Uniformly sample columns until one has room. Callers guarantee the
    /// board is not full.
    fn random_column(&mut self, board: &Board) -> usize {
        loop {
            let col = self.rng.random_range(0..board.columns());
            if !board.is_column_full(col) {
                return col;
            }
        }
    }
}

impl<R: Rng> Agent for GreedyAgent<R> {
    fn choose_move(
        &mut self,
        board: &mut Board,
        player: Player,
    ) -> Result<MoveChoice, AgentError> {
        if board.is_full() {
            return Err(AgentError::NoLegalMove);
        }

        if self.rng.random::<f64>() < self.config.random_move_probability {
            let column = self.random_column(board);
            debug!("{player}: random override -> column {column}");
            return Ok(MoveChoice::new(column, MoveReason::RandomOverride));
        }

        if let Some(column) = completing_column(board, player.other())? {
            debug!("{player}: blocking {} at column {column}", player.other());
            return Ok(MoveChoice::new(column, MoveReason::Block));
        }

        if let Some(column) = completing_column(board, player)? {
            debug!("{player}: winning at column {column}");
            return Ok(MoveChoice::new(column, MoveReason::Win));
        }

        let column = self.random_column(board);
        debug!("{player}: no tactic, random column {column}");
        Ok(MoveChoice::new(column, MoveReason::Random))
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

/// Lowest column where a disc for `player` would complete a line, found by
/// dropping and retracting a disc in each column in ascending order. The
/// board is unchanged on return.
pub fn completing_column(board: &mut Board, player: Player) -> Result<Option<usize>, AgentError> {
    let before = board.disc_count();
    for column in 0..board.columns() {
        let wins = match board.speculate(column, player) {
            Some(trial) => trial.wins(),
            None => continue,
        };
        ensure_balanced(board, before, column)?;
        if wins {
            return Ok(Some(column));
        }
    }
    Ok(None)
}

/// Fails when a trial drop in `column` left the disc count different from
/// `before`.
fn ensure_balanced(board: &Board, before: usize, column: usize) -> Result<(), AgentError> {
    if board.disc_count() == before {
        Ok(())
    } else {
        Err(AgentError::UnbalancedSpeculation { column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardConfig, ROWS};

    const ME: Player = Player::First;
    const OPP: Player = Player::Second;

    fn no_noise() -> GreedyConfig {
        GreedyConfig {
            random_move_probability: 0.0,
        }
    }

    #[test]
    fn test_blocks_horizontal_threat() {
        let mut board = Board::new();
        for col in 1..4 {
            board.drop_disc(col, OPP);
        }
        let mut agent = GreedyAgent::with_seed(no_noise(), 7);
        let choice = agent.choose_move(&mut board, ME).unwrap();
        // Both ends are open; the lowest index wins.
        assert_eq!(choice, MoveChoice::new(0, MoveReason::Block));
    }

    #[test]
    fn test_blocks_single_completion_cell() {
        let mut board = Board::new();
        for col in [0, 1, 2] {
            board.drop_disc(col, OPP);
        }
        let mut agent = GreedyAgent::with_seed(no_noise(), 3);
        let choice = agent.choose_move(&mut board, ME).unwrap();
        assert_eq!(choice.column, 3);
        assert_eq!(choice.reason, MoveReason::Block);
    }

    #[test]
    fn test_blocks_vertical_threat() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop_disc(5, OPP);
        }
        let mut agent = GreedyAgent::with_seed(no_noise(), 11);
        let choice = agent.choose_move(&mut board, ME).unwrap();
        assert_eq!(choice, MoveChoice::new(5, MoveReason::Block));
    }

    #[test]
    fn test_block_takes_priority_over_win() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop_disc(0, ME);
            board.drop_disc(6, OPP);
        }
        let mut agent = GreedyAgent::with_seed(no_noise(), 5);
        let choice = agent.choose_move(&mut board, ME).unwrap();
        assert_eq!(choice, MoveChoice::new(6, MoveReason::Block));
    }

    #[test]
    fn test_takes_win_when_nothing_to_block() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop_disc(4, ME);
        }
        let mut agent = GreedyAgent::with_seed(no_noise(), 9);
        let choice = agent.choose_move(&mut board, ME).unwrap();
        assert_eq!(choice, MoveChoice::new(4, MoveReason::Win));
    }

    #[test]
    fn test_choose_move_leaves_board_unchanged() {
        let mut board = Board::new();
        for col in [0, 1, 1, 2, 3, 3, 3] {
            board.drop_disc(col, if col % 2 == 0 { ME } else { OPP });
        }
        let before = board.clone();
        let mut agent = GreedyAgent::with_seed(GreedyConfig::default(), 21);
        for _ in 0..50 {
            agent.choose_move(&mut board, ME).unwrap();
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_random_move_avoids_full_columns() {
        let mut board = Board::new();
        for col in 0..6 {
            for i in 0..ROWS {
                // Checker pairs so no line forms in any direction we score
                board.drop_disc(col, if (i / 2 + col) % 2 == 0 { ME } else { OPP });
            }
        }
        let mut agent = GreedyAgent::with_seed(GreedyConfig::default(), 99);
        for _ in 0..100 {
            let choice = agent.choose_move(&mut board, ME).unwrap();
            assert_eq!(choice.column, 6);
        }
    }

    #[test]
    fn test_full_board_is_a_precondition_error() {
        let mut board = Board::with_config(BoardConfig { rows: 1, columns: 1 });
        board.drop_disc(0, OPP);
        let mut agent = GreedyAgent::with_seed(GreedyConfig::default(), 1);
        assert_eq!(
            agent.choose_move(&mut board, ME),
            Err(AgentError::NoLegalMove)
        );
    }

    #[test]
    fn test_always_random_override() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_disc(col, OPP);
        }
        let config = GreedyConfig {
            random_move_probability: 1.0,
        };
        let mut agent = GreedyAgent::with_seed(config, 4);
        let choice = agent.choose_move(&mut board, ME).unwrap();
        assert_eq!(choice.reason, MoveReason::RandomOverride);
    }

    #[test]
    fn test_block_is_deterministic_across_seeds() {
        let mut board = Board::new();
        board.drop_disc(6, ME);
        for col in [2, 3, 4] {
            board.drop_disc(col, OPP);
        }
        for seed in 0..50 {
            let mut agent = GreedyAgent::with_seed(no_noise(), seed);
            let choice = agent.choose_move(&mut board, ME).unwrap();
            assert_eq!(choice, MoveChoice::new(1, MoveReason::Block), "seed {seed}");
        }
    }

    #[test]
    fn test_completing_column_none_on_empty_board() {
        let mut board = Board::new();
        assert_eq!(completing_column(&mut board, ME), Ok(None));
        assert_eq!(board.disc_count(), 0);
    }

    #[test]
    fn test_unbalanced_trial_is_an_error() {
        let mut board = Board::new();
        assert_eq!(ensure_balanced(&board, 0, 2), Ok(()));

        // A disc that stayed behind after a trial drop
        board.drop_disc(2, ME);
        assert_eq!(
            ensure_balanced(&board, 0, 2),
            Err(AgentError::UnbalancedSpeculation { column: 2 })
        );
        assert_eq!(ensure_balanced(&board, 1, 2), Ok(()));
    }
}
