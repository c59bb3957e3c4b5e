use std::fmt;
use std::ops::Deref;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of consecutive discs needed to win.
pub const WIN_LENGTH: usize = 4;

/// Largest grid a configuration may ask for.
pub const MAX_CELLS: usize = 4096;

/// Board dimensions, loadable from the `[board]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl BoardConfig {
    /// `rows * columns`, or `None` on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            columns: COLS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(player) => player.symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
}

/// A gravity grid. Row 0 is the top, row `rows - 1` is the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the standard 6x7 dimensions
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create a new empty board with the given dimensions
    pub fn with_config(config: BoardConfig) -> Self {
        Board {
            rows: config.rows,
            columns: config.columns,
            cells: vec![Cell::Empty; config.rows * config.columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The column counted as "central" for statistics.
    pub fn center_column(&self) -> usize {
        self.columns / 2
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    /// Number of discs stacked in a column (0 for out-of-range columns)
    pub fn column_height(&self, col: usize) -> usize {
        if col >= self.columns {
            return 0;
        }
        (0..self.rows)
            .rev()
            .take_while(|&row| !self.get(row, col).is_empty())
            .count()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.columns || self.column_height(col) >= self.rows
    }

    /// Columns that still accept a disc, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Total number of discs on the board
    pub fn disc_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Drop a disc in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.columns {
            return Err(MoveError::InvalidColumn);
        }
        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        let row = self.rows - 1 - self.column_height(col);
        let idx = self.index(row, col);
        self.cells[idx] = player.to_cell();
        Ok(row)
    }

    /// Drop a disc in a column. Returns false, leaving the board untouched,
    /// when the column is out of range or already full.
    pub fn drop_disc(&mut self, col: usize, player: Player) -> bool {
        self.drop_piece(col, player).is_ok()
    }

    /// Remove the topmost disc of a column and return its owner. No-op on an
    /// empty or out-of-range column.
    pub fn remove_top_disc(&mut self, col: usize) -> Option<Player> {
        if col >= self.columns {
            return None;
        }
        let row = (0..self.rows).find(|&row| !self.get(row, col).is_empty())?;
        let idx = self.index(row, col);
        let owner = self.cells[idx].owner();
        self.cells[idx] = Cell::Empty;
        owner
    }

    /// Drop a disc that is taken back as soon as the returned guard goes out
    /// of scope. Returns `None` if the drop is illegal.
    pub fn speculate(&mut self, col: usize, player: Player) -> Option<SpeculativeDrop<'_>> {
        let row = self.drop_piece(col, player).ok()?;
        Some(SpeculativeDrop {
            board: self,
            column: col,
            row,
            player,
        })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|col| self.is_column_full(col))
    }

    /// Check if `player` owns a horizontal or vertical line of at least
    /// `WIN_LENGTH` discs. Diagonals do not count.
    pub fn check_win(&self, player: Player) -> bool {
        self.check_horizontal(player) || self.check_vertical(player)
    }

    fn check_horizontal(&self, player: Player) -> bool {
        (0..self.rows).any(|row| has_run((0..self.columns).map(|col| self.get(row, col)), player))
    }

    fn check_vertical(&self, player: Player) -> bool {
        (0..self.columns).any(|col| has_run((0..self.rows).map(|row| self.get(row, col)), player))
    }

    /// True when no column has an empty cell below an occupied one.
    pub fn is_settled(&self) -> bool {
        (0..self.columns).all(|col| {
            let height = self.column_height(col);
            (0..self.rows - height).all(|row| self.get(row, col).is_empty())
        })
    }

    /// Owned copy of the grid for renderers and telemetry
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.clone(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}

fn has_run(cells: impl Iterator<Item = Cell>, player: Player) -> bool {
    let target = player.to_cell();
    let mut run = 0;
    for cell in cells {
        if cell == target {
            run += 1;
            if run >= WIN_LENGTH {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// A disc placed by [`Board::speculate`]. Derefs to the board for queries and
/// removes the disc again on drop.
pub struct SpeculativeDrop<'a> {
    board: &'a mut Board,
    column: usize,
    row: usize,
    player: Player,
}

impl SpeculativeDrop<'_> {
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Whether the speculative disc completes a line for its owner
    pub fn wins(&self) -> bool {
        self.board.check_win(self.player)
    }
}

impl Deref for SpeculativeDrop<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for SpeculativeDrop<'_> {
    fn drop(&mut self) {
        let removed = self.board.remove_top_disc(self.column);
        debug_assert_eq!(removed, Some(self.player));
    }
}

/// Read-only copy of a board's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Snapshot {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.columns + col]
    }

    /// Iterate rows top to bottom
    pub fn grid_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns.max(1))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid_rows() {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Player = Player::First;
    const B: Player = Player::Second;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.rows(), ROWS);
        assert_eq!(board.columns(), COLS);
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.disc_count(), 0);
    }

    #[test]
    fn test_cell_count_detects_overflow() {
        assert_eq!(BoardConfig::default().cell_count(), Some(ROWS * COLS));
        let huge = BoardConfig {
            rows: usize::MAX / 2 + 1,
            columns: 2,
        };
        assert_eq!(huge.cell_count(), None);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, A).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Occupied(A));

        let row = board.drop_piece(3, B).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Occupied(B));
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            assert!(board.drop_disc(0, A));
        }

        assert!(board.is_column_full(0));
        let before = board.clone();
        assert_eq!(board.drop_piece(0, B), Err(MoveError::ColumnFull));
        assert!(!board.drop_disc(0, B));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(7, A), Err(MoveError::InvalidColumn));
        assert!(!board.drop_disc(usize::MAX, A));
        assert_eq!(board.disc_count(), 0);
    }

    #[test]
    fn test_remove_top_disc() {
        let mut board = Board::new();
        board.drop_disc(2, A);
        board.drop_disc(2, B);

        assert_eq!(board.remove_top_disc(2), Some(B));
        assert_eq!(board.get(4, 2), Cell::Empty);
        assert_eq!(board.get(5, 2), Cell::Occupied(A));
        assert_eq!(board.remove_top_disc(2), Some(A));
        assert_eq!(board.remove_top_disc(2), None);
        assert_eq!(board.remove_top_disc(99), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, A).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, A).unwrap();
        }
        assert!(board.check_win(A));
        assert!(!board.check_win(B));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_piece(3, B).unwrap();
        }
        assert!(board.check_win(B));
        assert!(!board.check_win(A));
    }

    #[test]
    fn test_longer_run_counts() {
        let mut board = Board::new();
        for col in 1..6 {
            board.drop_piece(col, A).unwrap();
        }
        assert!(board.check_win(A));
    }

    #[test]
    fn test_diagonal_is_not_a_win() {
        let mut board = Board::new();
        // Diagonal / pattern for A
        board.drop_piece(0, A).unwrap();

        board.drop_piece(1, B).unwrap();
        board.drop_piece(1, A).unwrap();

        board.drop_piece(2, B).unwrap();
        board.drop_piece(2, B).unwrap();
        board.drop_piece(2, A).unwrap();

        board.drop_piece(3, B).unwrap();
        board.drop_piece(3, A).unwrap();
        board.drop_piece(3, B).unwrap();
        board.drop_piece(3, A).unwrap();

        assert!(!board.check_win(A));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, A).unwrap();
        }
        assert!(!board.check_win(A));
    }

    #[test]
    fn test_broken_run_is_not_a_win() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.drop_piece(col, A).unwrap();
        }
        board.drop_piece(2, B).unwrap();
        assert!(!board.check_win(A));
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::new();
        assert!(!board.check_win(A));
        assert!(!board.check_win(B));
    }

    #[test]
    fn test_speculate_is_undone_on_scope_exit() {
        let mut board = Board::new();
        board.drop_disc(0, A);
        let before = board.clone();
        {
            let trial = board.speculate(0, B).unwrap();
            assert_eq!(trial.row(), 4);
            assert_eq!(trial.column(), 0);
            assert_eq!(trial.disc_count(), 2);
            assert!(!trial.wins());
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_speculate_rejects_full_column() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_disc(6, A);
        }
        assert!(board.speculate(6, B).is_none());
        assert!(board.speculate(COLS, B).is_none());
        assert_eq!(board.disc_count(), ROWS);
    }

    #[test]
    fn test_speculative_win_detection() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop_disc(5, B);
        }
        let trial = board.speculate(5, B).unwrap();
        assert!(trial.wins());
        drop(trial);
        assert!(!board.check_win(B));
    }

    #[test]
    fn test_custom_dimensions() {
        let mut board = Board::with_config(BoardConfig { rows: 4, columns: 5 });
        assert_eq!(board.center_column(), 2);
        for _ in 0..4 {
            assert!(board.drop_disc(4, A));
        }
        assert!(!board.drop_disc(4, A));
        assert!(!board.drop_disc(5, A));
        assert!(board.check_win(A));
    }

    #[test]
    fn test_small_board_never_wins() {
        let mut board = Board::with_config(BoardConfig { rows: 3, columns: 3 });
        for col in 0..3 {
            for _ in 0..3 {
                board.drop_disc(col, A);
            }
        }
        assert!(board.is_full());
        assert!(!board.check_win(A));
    }

    #[test]
    fn test_snapshot_matches_board() {
        let mut board = Board::new();
        board.drop_disc(3, A);
        board.drop_disc(3, B);
        let snapshot = board.snapshot();

        board.drop_disc(0, A);
        assert_eq!(snapshot.get(5, 3), Cell::Occupied(A));
        assert_eq!(snapshot.get(4, 3), Cell::Occupied(B));
        assert_eq!(snapshot.get(5, 0), Cell::Empty);
        assert_eq!(snapshot.grid_rows().count(), ROWS);
    }

    #[test]
    fn test_display_uses_symbols() {
        let mut board = Board::with_config(BoardConfig { rows: 2, columns: 3 });
        board.drop_disc(0, A);
        board.drop_disc(2, B);
        assert_eq!(board.to_string(), "...\nX.O\n");
    }

    #[test]
    fn test_settled_after_drops_and_removals() {
        let mut board = Board::new();
        for (i, col) in [0, 0, 1, 3, 3, 3].into_iter().enumerate() {
            let player = if i % 2 == 0 { A } else { B };
            board.drop_disc(col, player);
            assert!(board.is_settled());
        }
        board.remove_top_disc(3);
        assert!(board.is_settled());
    }
}
