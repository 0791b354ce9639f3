//! Four-in-a-row detection.
//!
//! Every check rescans the whole grid. All four axes are reduced to a list of
//! straight lines (a start cell plus a step) and walked by the same run
//! tracker, so rows, columns and both diagonals share one scanning rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Mark, COLS, ROWS};

/// Length of a winning run.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
    /// Bottom-left to top-right (/)
    DiagUp,
    /// Top-left to bottom-right (\)
    DiagDown,
}

impl Axis {
    /// (row, col) step taken between consecutive cells of a line
    fn step(self) -> (isize, isize) {
        match self {
            Axis::Row => (0, 1),
            Axis::Column => (1, 0),
            Axis::DiagUp => (-1, 1),
            Axis::DiagDown => (1, 1),
        }
    }

    /// First cell of every line along this axis, in scan order.
    fn starts(self) -> Vec<(usize, usize)> {
        match self {
            Axis::Row => (0..ROWS).map(|row| (row, 0)).collect(),
            Axis::Column => (0..COLS).map(|col| (0, col)).collect(),
            // Left edge then bottom edge: increasing start column, then row
            Axis::DiagUp => (0..ROWS)
                .map(|row| (row, 0))
                .chain((1..COLS).map(|col| (ROWS - 1, col)))
                .collect(),
            // Left edge then top edge
            Axis::DiagDown => (0..ROWS)
                .map(|row| (row, 0))
                .chain((1..COLS).map(|col| (0, col)))
                .collect(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Row => "row",
            Axis::Column => "column",
            Axis::DiagUp => "up right diagonal",
            Axis::DiagDown => "down right diagonal",
        };
        f.write_str(name)
    }
}

/// A completed four-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Win {
    pub mark: Mark,
    pub axis: Axis,
    /// The first four cells of the run as (row, col)
    pub cells: [(usize, usize); CONNECT],
}

impl Win {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Walk the line from `start` and return the cells of the first run of
/// `CONNECT` identical marks, if any.
fn scan_line(
    board: &Board,
    start: (usize, usize),
    (dr, dc): (isize, isize),
) -> Option<(Mark, [(usize, usize); CONNECT])> {
    let mut run: Vec<(usize, usize)> = Vec::with_capacity(CONNECT);
    let mut current = Cell::Empty;
    let (mut row, mut col) = (start.0 as isize, start.1 as isize);

    while (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col) {
        let pos = (row as usize, col as usize);
        let cell = board.get(pos.0, pos.1);

        if cell == current {
            run.push(pos);
        } else {
            current = cell;
            run.clear();
            run.push(pos);
        }

        if let Some(mark) = current.mark() {
            if run.len() == CONNECT {
                let mut cells = [(0, 0); CONNECT];
                cells.copy_from_slice(&run);
                return Some((mark, cells));
            }
        }

        row += dr;
        col += dc;
    }
    None
}

/// Number of cells on the line starting at `start` with the given step.
fn line_len(start: (usize, usize), (dr, dc): (isize, isize)) -> usize {
    let (mut row, mut col) = (start.0 as isize, start.1 as isize);
    let mut len = 0;
    while (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col) {
        len += 1;
        row += dr;
        col += dc;
    }
    len
}

fn check_axis(board: &Board, axis: Axis) -> Option<Win> {
    let step = axis.step();
    axis.starts()
        .into_iter()
        .filter(|&start| line_len(start, step) >= CONNECT)
        .find_map(|start| scan_line(board, start, step))
        .map(|(mark, cells)| {
            tracing::trace!(?axis, %mark, ?cells, "four in a row");
            Win { mark, axis, cells }
        })
}

/// Rows top to bottom, each scanned left to right.
pub fn check_rows(board: &Board) -> Option<Win> {
    check_axis(board, Axis::Row)
}

/// Columns left to right, each scanned top to bottom.
pub fn check_columns(board: &Board) -> Option<Win> {
    check_axis(board, Axis::Column)
}

/// Diagonals running bottom-left to top-right.
pub fn check_diagonals_ascending(board: &Board) -> Option<Win> {
    check_axis(board, Axis::DiagUp)
}

/// Diagonals running top-left to bottom-right.
pub fn check_diagonals_descending(board: &Board) -> Option<Win> {
    check_axis(board, Axis::DiagDown)
}

/// Look for a four-in-a-row anywhere on the board.
///
/// Axes are tried in a fixed order (columns, rows, descending diagonals,
/// ascending diagonals) and the first hit is returned, so a board holding
/// several completed lines always reports the same one.
pub fn check(board: &Board) -> Option<Win> {
    check_columns(board)
        .or_else(|| check_rows(board))
        .or_else(|| check_diagonals_descending(board))
        .or_else(|| check_diagonals_ascending(board))
}
