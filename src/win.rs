//! Win detection over sliding windows of `win_length` cells.

use crate::board::{Board, Cell, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along a row.
    Horizontal,
    /// Down a column.
    Vertical,
    /// Down and to the right.
    Diagonal,
    /// Down and to the left.
    AntiDiagonal,
}

impl Direction {
    fn step(self) -> (usize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// `len` contiguous cells starting at `start` and heading in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: (usize, usize),
    pub direction: Direction,
    pub len: usize,
}

impl Window {
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        let (dr, dc) = self.direction.step();
        let (row, col) = self.start;
        (0..self.len).map(move |i| (row + i * dr, (col as isize + i as isize * dc) as usize))
    }

    /// Number of cells in the window holding `mark`.
    pub fn count(self, board: &Board, mark: Mark) -> usize {
        self.cells()
            .filter(|&(row, col)| board.get(row, col) == Cell::Filled(mark))
            .count()
    }
}

/// All windows on a board: rows, then columns, then `↘` diagonals, then `↙` diagonals.
pub fn windows(size: usize, win_length: usize) -> impl Iterator<Item = Window> {
    let last = size - win_length;
    let window = move |start, direction| Window {
        start,
        direction,
        len: win_length,
    };

    let rows = (0..size)
        .flat_map(move |r| (0..=last).map(move |c| window((r, c), Direction::Horizontal)));
    let cols = (0..size)
        .flat_map(move |c| (0..=last).map(move |r| window((r, c), Direction::Vertical)));
    let diagonals = (0..=last)
        .flat_map(move |r| (0..=last).map(move |c| window((r, c), Direction::Diagonal)));
    let anti_diagonals = (0..=last).flat_map(move |r| {
        (win_length - 1..size).map(move |c| window((r, c), Direction::AntiDiagonal))
    });

    rows.chain(cols).chain(diagonals).chain(anti_diagonals)
}

/// The first window completely filled by `mark`, if any.
pub fn winning_line(board: &Board, mark: Mark) -> Option<Vec<(usize, usize)>> {
    windows(board.size(), board.win_length())
        .find(|w| w.count(board, mark) == w.len)
        .map(|w| w.cells().collect())
}

pub fn has_win(board: &Board, mark: Mark) -> bool {
    windows(board.size(), board.win_length()).any(|w| w.count(board, mark) == w.len)
}

/// The mark holding a complete window. X is checked first.
pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| has_win(board, mark))
}
