use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::game::{Board, BoardConfig};
use crate::simulation::{GameStatistics, MatchReport, SimulationConfig, SimulationObserver};

use super::simulation_view::{self, ViewState, ViewStatus};

/// Draws each move of a sequential simulation and paces it with the
/// configured delays. Terminal setup and teardown belong to the caller.
pub struct TerminalViewer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: ViewState,
    board_config: BoardConfig,
    move_delay: Duration,
    match_delay: Duration,
    skip_pauses: bool,
    quit: bool,
    error: Option<io::Error>,
}

impl TerminalViewer {
    pub fn new(
        terminal: Terminal<CrosstermBackend<Stdout>>,
        board_config: BoardConfig,
        config: &SimulationConfig,
    ) -> Self {
        TerminalViewer {
            terminal,
            view: ViewState::new(Board::with_config(board_config).snapshot(), config.num_matches),
            board_config,
            move_delay: Duration::from_millis(config.move_delay_ms),
            match_delay: Duration::from_millis(config.match_delay_ms),
            skip_pauses: false,
            quit: false,
            error: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// First terminal error hit while drawing, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Show the final statistics and wait for 'q'.
    pub fn show_final(&mut self, stats: &GameStatistics) -> io::Result<()> {
        self.view.stats = stats.clone();
        self.view.status = ViewStatus::Finished;
        loop {
            self.draw()?;
            if self.quit {
                return Ok(());
            }
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
                    {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let view = &self.view;
        self.terminal
            .draw(|f| simulation_view::render(f, view))
            .map(|_| ())
    }

    /// Redraw, keeping the first error and stopping the run on failure.
    fn redraw(&mut self) {
        if let Err(e) = self.draw() {
            self.fail(e);
        }
    }

    fn fail(&mut self, e: io::Error) {
        if self.error.is_none() {
            self.error = Some(e);
        }
        self.quit = true;
    }

    /// Wait out `delay` while handling key presses.
    fn pace(&mut self, delay: Duration) {
        let deadline = Instant::now() + delay;
        while !self.quit && !self.skip_pauses {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            match event::poll(remaining) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                        KeyCode::Char('s') | KeyCode::Char('S') => self.skip_pauses = true,
                        _ => {}
                    },
                    Ok(_) => {}
                    Err(e) => self.fail(e),
                },
                Ok(false) => {}
                Err(e) => self.fail(e),
            }
        }
    }
}

impl SimulationObserver for TerminalViewer {
    fn on_match_start(&mut self, index: usize) {
        self.view.match_index = index;
        self.view.move_number = 0;
        self.view.snapshot = Board::with_config(self.board_config).snapshot();
        self.view.status = ViewStatus::Playing;
        if !self.quit {
            self.redraw();
        }
    }

    fn on_move(&mut self, _index: usize, board: &Board) {
        self.view.move_number += 1;
        if self.quit {
            return;
        }
        self.view.snapshot = board.snapshot();
        self.redraw();
        self.pace(self.move_delay);
    }

    fn on_match_end(&mut self, _index: usize, report: &MatchReport, stats: &GameStatistics) {
        self.view.last_outcome = Some(report.outcome);
        self.view.stats = stats.clone();
        self.view.status = ViewStatus::BetweenMatches;
        if self.quit {
            return;
        }
        self.redraw();
        self.pace(self.match_delay);
    }

    fn should_stop(&self) -> bool {
        self.quit
    }
}
