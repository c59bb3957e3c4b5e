use crate::game::{Cell, Player, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Disc color for a player.
pub fn player_color(player: Player) -> Color {
    match player {
        Player::First => Color::Red,
        Player::Second => Color::Yellow,
    }
}

/// Lines for a board snapshot, top row first, with a column index footer.
pub fn board_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for row in snapshot.grid_rows() {
        let spans: Vec<Span> = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Occupied(player) => Span::styled(
                    " \u{25cf} ",
                    Style::default().fg(player_color(*player)),
                ),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let footer: Vec<Span> = (0..snapshot.columns())
        .map(|col| Span::styled(format!("{:^3}", col), Style::default().fg(Color::Cyan)))
        .collect();
    lines.push(Line::from(footer));
    lines
}

/// Render a board snapshot inside a bordered block.
pub fn render_board(frame: &mut Frame, snapshot: &Snapshot, title: &str, area: Rect) {
    let widget = Paragraph::new(board_lines(snapshot)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );
    frame.render_widget(widget, area);
}
