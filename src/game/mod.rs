//! Core Connect Four game logic: gravity board with speculative drops,
//! player identifiers, and the per-match phase machine.

mod board;
mod player;
mod state;

pub use board::{
    Board, BoardConfig, Cell, MoveError, Snapshot, SpeculativeDrop, COLS, MAX_CELLS, ROWS,
    WIN_LENGTH,
};
pub use player::Player;
pub use state::{MatchOutcome, MatchPhase};
