//! Move-choosing strategies: the `Agent` trait, the greedy block/win/random
//! heuristic, and a uniform random baseline.

mod agent;
pub mod greedy;
mod random;

pub use agent::{Agent, AgentKind, MoveChoice, MoveEvent, MoveReason};
pub use greedy::{GreedyAgent, GreedyConfig};
pub use random::RandomAgent;
