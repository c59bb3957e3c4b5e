use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Player),
    Draw,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            MatchOutcome::Winner(player) => Some(player),
            MatchOutcome::Draw => None,
        }
    }
}

/// Phases of a single match.
///
/// `AwaitingMove(First)` is the initial phase; `Won` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingMove(Player),
    MoveApplied { player: Player, column: usize },
    Won(Player),
    Draw,
}

impl MatchPhase {
    /// Initial phase: the first mover is on turn
    pub fn initial() -> Self {
        MatchPhase::AwaitingMove(Player::First)
    }

    /// Check if the match is over
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Won(_) | MatchPhase::Draw)
    }

    /// Get the match outcome if the match is over
    pub fn outcome(self) -> Option<MatchOutcome> {
        match self {
            MatchPhase::Won(player) => Some(MatchOutcome::Winner(player)),
            MatchPhase::Draw => Some(MatchOutcome::Draw),
            _ => None,
        }
    }

    /// Player who is on turn, if the match is waiting for a move
    pub fn active_player(self) -> Option<Player> {
        match self {
            MatchPhase::AwaitingMove(player) => Some(player),
            _ => None,
        }
    }

    /// Settle a `MoveApplied` phase against the board: a line for the mover
    /// wins, otherwise a full board draws, otherwise the turn passes. Other
    /// phases are returned unchanged.
    pub fn resolve(self, board: &Board) -> MatchPhase {
        match self {
            MatchPhase::MoveApplied { player, .. } => {
                if board.check_win(player) {
                    MatchPhase::Won(player)
                } else if board.is_full() {
                    MatchPhase::Draw
                } else {
                    MatchPhase::AwaitingMove(player.other())
                }
            }
            phase => phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardConfig;

    #[test]
    fn test_initial_phase() {
        let phase = MatchPhase::initial();
        assert_eq!(phase.active_player(), Some(Player::First));
        assert!(!phase.is_terminal());
        assert_eq!(phase.outcome(), None);
    }

    #[test]
    fn test_resolve_passes_turn() {
        let mut board = Board::new();
        board.drop_disc(3, Player::First);
        let phase = MatchPhase::MoveApplied {
            player: Player::First,
            column: 3,
        }
        .resolve(&board);
        assert_eq!(phase, MatchPhase::AwaitingMove(Player::Second));
    }

    #[test]
    fn test_resolve_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_disc(col, Player::Second);
        }
        let phase = MatchPhase::MoveApplied {
            player: Player::Second,
            column: 3,
        }
        .resolve(&board);
        assert_eq!(phase, MatchPhase::Won(Player::Second));
        assert_eq!(phase.outcome(), Some(MatchOutcome::Winner(Player::Second)));
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_resolve_draw_on_full_board() {
        let mut board = Board::with_config(BoardConfig { rows: 1, columns: 2 });
        board.drop_disc(0, Player::First);
        board.drop_disc(1, Player::Second);
        let phase = MatchPhase::MoveApplied {
            player: Player::Second,
            column: 1,
        }
        .resolve(&board);
        assert_eq!(phase, MatchPhase::Draw);
        assert_eq!(phase.outcome().and_then(MatchOutcome::winner), None);
    }

    #[test]
    fn test_resolve_leaves_terminal_phases_alone() {
        let board = Board::new();
        assert_eq!(MatchPhase::Draw.resolve(&board), MatchPhase::Draw);
        assert_eq!(
            MatchPhase::AwaitingMove(Player::Second).resolve(&board),
            MatchPhase::AwaitingMove(Player::Second)
        );
    }
}
