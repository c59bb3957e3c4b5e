use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::game::{MatchOutcome, Player, Snapshot};
use crate::simulation::GameStatistics;

use super::board_widget::{self, player_color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Playing,
    BetweenMatches,
    Finished,
}

/// Everything the viewer draws in one frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub snapshot: Snapshot,
    pub match_index: usize,
    pub total_matches: usize,
    pub move_number: usize,
    pub last_outcome: Option<MatchOutcome>,
    pub stats: GameStatistics,
    pub status: ViewStatus,
}

impl ViewState {
    pub fn new(snapshot: Snapshot, total_matches: usize) -> Self {
        ViewState {
            snapshot,
            match_index: 0,
            total_matches,
            move_number: 0,
            last_outcome: None,
            stats: GameStatistics::new(),
            status: ViewStatus::Playing,
        }
    }
}

/// Render the full simulation view.
pub fn render(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),  // Board + stats
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_main(frame, view, chunks[1]);
    render_progress(frame, view, chunks[2]);
    render_footer(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, view: &ViewState, area: Rect) {
    let (status_str, status_color) = match view.status {
        ViewStatus::Playing => ("PLAYING", Color::Green),
        ViewStatus::BetweenMatches => ("NEXT MATCH", Color::Yellow),
        ViewStatus::Finished => ("FINISHED", Color::Cyan),
    };

    let header_text = Line::from(vec![
        Span::styled(
            "Connect Four Simulation",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::raw(format!(
            "Match: {}/{}",
            (view.match_index + 1).min(view.total_matches),
            view.total_matches
        )),
        Span::raw(format!("  |  Move: {}", view.move_number)),
        Span::raw("  |  ["),
        Span::styled(
            status_str,
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("]"),
    ]);

    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_main(frame: &mut Frame, view: &ViewState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    board_widget::render_board(frame, &view.snapshot, "Board", cols[0]);
    render_stats_panel(frame, view, cols[1]);
}

fn render_stats_panel(frame: &mut Frame, view: &ViewState, area: Rect) {
    let stats = &view.stats;
    let label = Style::default().fg(Color::Gray);

    let mut lines = Vec::new();
    for player in Player::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ({}) wins: ", player, player.symbol()),
                Style::default().fg(player_color(player)),
            ),
            Span::raw(format!(
                "{} ({:.1}%)",
                stats.wins(player),
                stats.win_rate(player) * 100.0
            )),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Draws: ", label),
        Span::raw(format!("{} ({:.1}%)", stats.draws(), stats.draw_rate() * 100.0)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Blocked moves: ", label),
        Span::raw(stats.total_blocked_moves().to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Central moves: ", label),
        Span::raw(stats.total_central_moves().to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Avg length: ", label),
        Span::raw(format!("{:.1}", stats.average_match_length())),
    ]));

    if let Some(outcome) = view.last_outcome {
        let text = match outcome {
            MatchOutcome::Winner(player) => format!("Last match: {} wins", player),
            MatchOutcome::Draw => "Last match: draw".to_string(),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Statistics"),
    );
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, view: &ViewState, area: Rect) {
    let done = view.stats.matches() as f64;
    let ratio = if view.total_matches == 0 {
        0.0
    } else {
        (done / view.total_matches as f64).clamp(0.0, 1.0)
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!("{}/{}", done as u64, view.total_matches));
    frame.render_widget(gauge, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new("q: quit after the current match  |  s: skip pauses")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
