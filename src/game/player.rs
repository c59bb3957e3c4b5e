use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Convert player to the cell it occupies
    pub fn to_cell(self) -> Cell {
        Cell::Occupied(self)
    }

    /// Zero-based seat index, handy for per-player counters
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::First => "Player 1",
            Player::Second => "Player 2",
        }
    }

    /// Disc symbol used in text renderings of the board
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::First.other(), Player::Second);
        assert_eq!(Player::Second.other(), Player::First);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::First.name(), "Player 1");
        assert_eq!(Player::Second.to_string(), "Player 2");
    }

    #[test]
    fn test_player_index_matches_turn_order() {
        for (i, player) in Player::ALL.iter().enumerate() {
            assert_eq!(player.index(), i);
        }
    }

    #[test]
    fn test_symbols_are_distinct() {
        assert_ne!(Player::First.symbol(), Player::Second.symbol());
        assert_eq!(Player::First.to_cell(), Cell::Occupied(Player::First));
    }
}
