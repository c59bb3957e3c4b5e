use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AgentError;
use crate::game::{Board, Player};

use super::agent::{Agent, MoveChoice, MoveReason};

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent<R = StdRng> {
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn choose_move(
        &mut self,
        board: &mut Board,
        _player: Player,
    ) -> Result<MoveChoice, AgentError> {
        let columns = board.legal_columns();
        if columns.is_empty() {
            return Err(AgentError::NoLegalMove);
        }
        let idx = self.rng.random_range(0..columns.len());
        Ok(MoveChoice::new(columns[idx], MoveReason::Random))
    }

    fn name(&self) -> &str {
        "Random"
    }
}
