use std::fmt;

use crate::game::Player;

use super::controller::MatchReport;
use super::events::{EventSink, MatchEvent};

/// Running counters over a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStatistics {
    wins: [u64; 2],
    draws: u64,
    blocked_moves: [u64; 2],
    central_moves: [u64; 2],
    total_moves: u64,
}

/// Flat, serializable view of [`GameStatistics`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatisticsSummary {
    pub matches: u64,
    pub player1_wins: u64,
    pub player2_wins: u64,
    pub draws: u64,
    pub blocked_moves: u64,
    pub central_moves: u64,
    pub player1_win_rate: f32,
    pub player2_win_rate: f32,
    pub draw_rate: f32,
    pub average_match_length: f32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished match into the counters.
    pub fn record_match(&mut self, report: &MatchReport, events: &[MatchEvent]) {
        for &event in events {
            self.record(event);
        }
        self.total_moves += report.moves as u64;
    }

    /// Matches that reached an outcome.
    pub fn matches(&self) -> u64 {
        self.wins[0] + self.wins[1] + self.draws
    }

    pub fn wins(&self, player: Player) -> u64 {
        self.wins[player.index()]
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn blocked_moves(&self, player: Player) -> u64 {
        self.blocked_moves[player.index()]
    }

    pub fn total_blocked_moves(&self) -> u64 {
        self.blocked_moves.iter().sum()
    }

    pub fn central_moves(&self, player: Player) -> u64 {
        self.central_moves[player.index()]
    }

    pub fn total_central_moves(&self) -> u64 {
        self.central_moves.iter().sum()
    }

    pub fn win_rate(&self, player: Player) -> f32 {
        ratio(self.wins(player), self.matches())
    }

    pub fn draw_rate(&self) -> f32 {
        ratio(self.draws, self.matches())
    }

    pub fn average_match_length(&self) -> f32 {
        ratio(self.total_moves, self.matches())
    }

    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            matches: self.matches(),
            player1_wins: self.wins(Player::First),
            player2_wins: self.wins(Player::Second),
            draws: self.draws,
            blocked_moves: self.total_blocked_moves(),
            central_moves: self.total_central_moves(),
            player1_win_rate: self.win_rate(Player::First),
            player2_win_rate: self.win_rate(Player::Second),
            draw_rate: self.draw_rate(),
            average_match_length: self.average_match_length(),
        }
    }
}

fn ratio(count: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    count as f32 / total as f32
}

impl EventSink for GameStatistics {
    fn record(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::PlayerWon(player) => self.wins[player.index()] += 1,
            MatchEvent::Draw => self.draws += 1,
            MatchEvent::BlockedMove(player) => self.blocked_moves[player.index()] += 1,
            MatchEvent::CentralColumnPlayed(player) => self.central_moves[player.index()] += 1,
        }
    }
}

impl fmt::Display for GameStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game Statistics ({} matches):", self.matches())?;
        for player in Player::ALL {
            writeln!(
                f,
                "{} Wins: {} ({:.1}%)",
                player,
                self.wins(player),
                self.win_rate(player) * 100.0
            )?;
        }
        writeln!(f, "Draws: {} ({:.1}%)", self.draws, self.draw_rate() * 100.0)?;
        writeln!(
            f,
            "Blocked Moves: {} (P1 {}, P2 {})",
            self.total_blocked_moves(),
            self.blocked_moves(Player::First),
            self.blocked_moves(Player::Second)
        )?;
        writeln!(
            f,
            "Central Moves: {} (P1 {}, P2 {})",
            self.total_central_moves(),
            self.central_moves(Player::First),
            self.central_moves(Player::Second)
        )?;
        write!(f, "Average Match Length: {:.1} moves", self.average_match_length())
    }
}
