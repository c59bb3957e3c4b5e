//! Terminal UI: a live board and statistics view that follows a running
//! simulation move by move.

pub mod board_widget;
pub mod simulation_view;
mod viewer;

pub use viewer::TerminalViewer;
