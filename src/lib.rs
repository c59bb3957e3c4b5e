//! # Connect Four Simulation
//!
//! Repeated Connect Four matches between automated agents, with aggregate
//! outcome statistics. Lines of four count horizontally and vertically only.
//!
//! ## Modules
//!
//! - [`game`]: Board with speculative drops, players, match phases
//! - [`ai`]: Agent trait, greedy block/win/random heuristic, random baseline
//! - [`simulation`]: Match controller, event sinks, statistics, batch driver
//! - [`ui`]: Terminal viewer for watching matches live
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod simulation;
pub mod ui;
