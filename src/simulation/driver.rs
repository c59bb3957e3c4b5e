use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use crate::ai::{AgentKind, GreedyConfig};
use crate::error::SimulationError;
use crate::game::{Board, BoardConfig, Player};

use super::controller::{MatchController, MatchReport};
use super::events::MatchEvent;
use super::statistics::GameStatistics;

/// Simulation driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_matches: usize,
    /// Worker threads; 1 runs every match on the calling thread.
    pub threads: usize,
    /// Base seed for reproducible runs. `None` seeds every agent from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub first_agent: AgentKind,
    pub second_agent: AgentKind,
    /// Pause after each move, honoured by the terminal viewer only.
    pub move_delay_ms: u64,
    /// Pause between matches, honoured by the terminal viewer only.
    pub match_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_matches: 20,
            threads: 1,
            seed: None,
            first_agent: AgentKind::Greedy,
            second_agent: AgentKind::Greedy,
            move_delay_ms: 500,
            match_delay_ms: 2000,
        }
    }
}

/// Hooks for watching a sequential simulation. All methods default to no-ops.
pub trait SimulationObserver {
    fn on_match_start(&mut self, _index: usize) {}

    fn on_move(&mut self, _index: usize, _board: &Board) {}

    fn on_match_end(&mut self, _index: usize, _report: &MatchReport, _stats: &GameStatistics) {}

    /// Checked before each match; returning true ends the run early.
    fn should_stop(&self) -> bool {
        false
    }
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Events and report of one finished match.
struct MatchRecord {
    report: MatchReport,
    events: Vec<MatchEvent>,
}

/// Runs a batch of matches and aggregates their events.
pub struct Simulation {
    board: BoardConfig,
    agent: GreedyConfig,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(board: BoardConfig, agent: GreedyConfig, config: SimulationConfig) -> Self {
        Simulation {
            board,
            agent,
            config,
        }
    }

    /// Build the controller for match `index` with fresh board and agents.
    pub fn build_match(&self, index: usize) -> MatchController {
        let seed_for = |player: Player| {
            self.config
                .seed
                .map(|base| match_seed(base, index, player))
        };
        MatchController::new(
            self.board,
            self.config
                .first_agent
                .build(self.agent, seed_for(Player::First)),
            self.config
                .second_agent
                .build(self.agent, seed_for(Player::Second)),
        )
    }

    fn play_match<F: FnMut(&Board)>(
        &self,
        index: usize,
        observer: F,
    ) -> Result<MatchRecord, SimulationError> {
        let mut controller = self.build_match(index);
        let mut events: Vec<MatchEvent> = Vec::new();
        let report = controller.run_observed(&mut events, observer)?;
        debug!(
            "Match {}: {:?} after {} moves",
            index + 1,
            report.outcome,
            report.moves
        );
        Ok(MatchRecord { report, events })
    }

    /// Run every match and return the aggregated statistics. Uses worker
    /// threads when `threads > 1`.
    pub fn run(&self) -> Result<GameStatistics, SimulationError> {
        if self.config.threads > 1 && self.config.num_matches > 1 {
            self.run_parallel()
        } else {
            self.run_observed(&mut NoopObserver)
        }
    }

    /// Run matches one after another on the calling thread, reporting
    /// progress to `observer`.
    pub fn run_observed(
        &self,
        observer: &mut dyn SimulationObserver,
    ) -> Result<GameStatistics, SimulationError> {
        info!(
            "Starting {} matches ({} vs {})",
            self.config.num_matches, self.config.first_agent, self.config.second_agent
        );
        let mut stats = GameStatistics::new();

        for index in 0..self.config.num_matches {
            if observer.should_stop() {
                info!("Stopped after {} matches", index);
                break;
            }
            observer.on_match_start(index);
            let record = self.play_match(index, |board| observer.on_move(index, board))?;
            stats.record_match(&record.report, &record.events);
            observer.on_match_end(index, &record.report, &stats);
        }

        info!("Simulation finished: {} matches", stats.matches());
        Ok(stats)
    }

    /// Run matches across scoped worker threads. Each match owns its board
    /// and agents; results flow through one channel to a single aggregator.
    pub fn run_parallel(&self) -> Result<GameStatistics, SimulationError> {
        let total = self.config.num_matches;
        let threads = self.config.threads.clamp(1, total.max(1));
        info!(
            "Starting {} matches on {} threads ({} vs {})",
            total, threads, self.config.first_agent, self.config.second_agent
        );

        let (tx, rx) = mpsc::channel::<Result<MatchRecord, SimulationError>>();

        let stats = thread::scope(|scope| -> Result<GameStatistics, SimulationError> {
            let handles: Vec<_> = (0..threads)
                .map(|worker| {
                    let tx = tx.clone();
                    scope.spawn(move || {
                        for index in (worker..total).step_by(threads) {
                            if tx.send(self.play_match(index, |_| {})).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            drop(tx);

            let mut stats = GameStatistics::new();
            let mut first_error = None;
            for result in rx {
                match result {
                    Ok(record) => stats.record_match(&record.report, &record.events),
                    Err(e) => {
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                }
            }

            for handle in handles {
                handle.join().map_err(|_| SimulationError::WorkerPanicked)?;
            }
            match first_error {
                Some(e) => Err(e),
                None => Ok(stats),
            }
        })?;

        info!("Simulation finished: {} matches", stats.matches());
        Ok(stats)
    }
}

/// Seed for `player`'s agent in match `index`. Depends only on its inputs,
/// so a match plays the same on any worker thread.
pub fn match_seed(base_seed: u64, index: usize, player: Player) -> u64 {
    let slot = ((index as u64) << 1) | player.index() as u64;
    mix(base_seed ^ mix(slot))
}

/// SplitMix64 finalizer.
fn mix(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
