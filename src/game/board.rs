use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// The symbol a player drops into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// The 6x7 grid. Row 0 is the top, row 5 is the bottom.
///
/// During play the grid only changes through [`Board::drop_piece`], which keeps
/// every piece resting on the bottom row or on another piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from explicit rows, top row first.
    ///
    /// No gravity check is made, so this can describe positions that never
    /// arise in play. Useful for probing the win detector.
    pub fn from_rows(cells: [[Cell; COLS]; ROWS]) -> Self {
        Board { cells }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Read-only view of the grid, top row first
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Whether a piece can still be dropped into `col`
    pub fn is_column_playable(&self, col: usize) -> Result<bool, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        Ok(self.cells[0][col].is_empty())
    }

    /// Columns that still have room, left to right
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS)
            .filter(|&col| self.cells[0][col].is_empty())
            .collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, mark: Mark) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        // Lowest empty row wins; scanning from the bottom keeps the stack gap-free
        for row in (0..ROWS).rev() {
            if self.cells[row][col].is_empty() {
                self.cells[row][col] = mark.to_cell();
                tracing::debug!(col, row, %mark, "piece dropped");
                return Ok(row);
            }
        }

        Err(MoveError::ColumnFull(col))
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact diagram: one line per row, `.` for empty, `X`/`O` for marks.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

/// Parses the diagram written by `Display`. Blank lines and surrounding
/// whitespace are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount(lines.len()));
        }

        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(BoardParseError::RowLength { row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                cells[row][col] =
                    Cell::from_char(ch).ok_or(BoardParseError::BadCell { row, ch })?;
            }
        }
        Ok(Board { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
        assert!(!board.is_full());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Mark::X).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Cell::X);

        let row = board.drop_piece(3, Mark::O).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Cell::O);
    }

    #[test]
    fn test_column_fills_bottom_to_top() {
        let mut board = Board::new();
        for expected in (0..ROWS).rev() {
            assert_eq!(board.drop_piece(2, Mark::X).unwrap(), expected);
        }
        for row in 0..ROWS {
            assert_eq!(board.get(row, 2), Cell::X);
        }
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Mark::X).unwrap();
        }

        assert_eq!(board.is_column_playable(0), Ok(false));
        assert_eq!(board.drop_piece(0, Mark::O), Err(MoveError::ColumnFull(0)));
        assert_eq!(board.legal_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(7, Mark::X), Err(MoveError::InvalidColumn(7)));
        assert_eq!(board.is_column_playable(7), Err(MoveError::InvalidColumn(7)));
        assert_eq!(board.is_column_playable(6), Ok(true));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Mark::X).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), ROWS * COLS);
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_one_empty_cell_is_not_full() {
        let mut cells = [[Cell::O; COLS]; ROWS];
        cells[0][6] = Cell::Empty;
        let board = Board::from_rows(cells);
        assert!(!board.is_full());
        assert_eq!(board.is_column_playable(6), Ok(true));
    }

    #[test]
    fn test_parse_and_display() {
        let text = "
            .......
            .......
            .......
            .......
            ...O...
            ..XXO..
        ";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.get(4, 3), Cell::O);
        assert_eq!(board.get(5, 2), Cell::X);
        assert_eq!(board.piece_count(), 4);
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ".......".parse::<Board>(),
            Err(BoardParseError::RowCount(1))
        );
        let short = "......\n.......\n.......\n.......\n.......\n.......";
        assert_eq!(
            short.parse::<Board>(),
            Err(BoardParseError::RowLength { row: 0, len: 6 })
        );
        let bad = ".......\n.......\n.......\n.......\n.......\n...Z...";
        assert_eq!(
            bad.parse::<Board>(),
            Err(BoardParseError::BadCell { row: 5, ch: 'Z' })
        );
    }

    #[test]
    fn test_mark_conversions() {
        assert_eq!(Mark::X.other(), Mark::O);
        assert_eq!(Mark::O.to_cell(), Cell::O);
        assert_eq!(Cell::X.mark(), Some(Mark::X));
        assert_eq!(Cell::Empty.mark(), None);
    }
}
