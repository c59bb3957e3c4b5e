use std::fmt;
use std::str::FromStr;

use crate::error::AgentError;
use crate::game::{Board, Player};

use super::greedy::{GreedyAgent, GreedyConfig};
use super::random::RandomAgent;

/// Why an agent picked its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveReason {
    /// The noise roll fired and tactics were skipped.
    RandomOverride,
    /// The column stops an immediate opponent line.
    Block,
    /// The column completes the agent's own line.
    Win,
    /// No tactic applied; uniformly sampled legal column.
    Random,
}

/// Observable facts about a single move, for statistics consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveEvent {
    BlockedOpponent,
    PlayedCentralColumn,
}

/// A column chosen by an agent, with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub column: usize,
    pub reason: MoveReason,
}

impl MoveChoice {
    pub fn new(column: usize, reason: MoveReason) -> Self {
        MoveChoice { column, reason }
    }

    /// Events this move produces on a board whose central column is
    /// `center_column`.
    pub fn events(&self, center_column: usize) -> Vec<MoveEvent> {
        let mut events = Vec::new();
        if self.reason == MoveReason::Block {
            events.push(MoveEvent::BlockedOpponent);
        }
        if self.column == center_column {
            events.push(MoveEvent::PlayedCentralColumn);
        }
        events
    }
}

/// Universal interface for move-choosing strategies.
pub trait Agent {
    /// Pick a legal column for `player`. The board is lent for the duration
    /// of the call only and must be left exactly as it was received.
    fn choose_move(&mut self, board: &mut Board, player: Player)
        -> Result<MoveChoice, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Strategies selectable from the config file and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Greedy,
    Random,
}

impl AgentKind {
    /// Build a boxed agent. `seed` of `None` draws from OS entropy.
    pub fn build(self, config: GreedyConfig, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (AgentKind::Greedy, Some(seed)) => Box::new(GreedyAgent::with_seed(config, seed)),
            (AgentKind::Greedy, None) => Box::new(GreedyAgent::new(config)),
            (AgentKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
            (AgentKind::Random, None) => Box::new(RandomAgent::new()),
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(AgentKind::Greedy),
            "random" => Ok(AgentKind::Random),
            other => Err(format!(
                "unknown agent '{other}' (expected 'greedy' or 'random')"
            )),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Greedy => f.write_str("greedy"),
            AgentKind::Random => f.write_str("random"),
        }
    }
}
