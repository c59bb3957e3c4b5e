//! Match orchestration: the per-match controller, event sinks, the
//! statistics aggregator, and the batch driver.

pub mod controller;
pub mod driver;
pub mod events;
pub mod statistics;

pub use controller::{MatchController, MatchReport};
pub use driver::{match_seed, NoopObserver, Simulation, SimulationConfig, SimulationObserver};
pub use events::{EventSink, MatchEvent};
pub use statistics::{GameStatistics, StatisticsSummary};
