use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::InvalidMove;

/// A player's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Filled(Mark),
}

/// The two grids the game is played on. Both need a full line to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSize {
    Three,
    Four,
}

impl BoardSize {
    pub fn side(self) -> usize {
        match self {
            BoardSize::Three => 3,
            BoardSize::Four => 4,
        }
    }
}

/// Square grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        let side = size.side();
        Self::with_win_length(side, side)
    }

    /// Builds an empty `size`x`size` board where `win_length` in a row wins.
    ///
    /// # Panics
    ///
    /// Panics unless `2 <= win_length <= size`.
    pub fn with_win_length(size: usize, win_length: usize) -> Self {
        assert!(
            win_length >= 2 && win_length <= size,
            "win length {win_length} does not fit a {size}x{size} board"
        );
        Self {
            size,
            win_length,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(self.in_range(row, col), "({row}, {col}) is off the board");
        self.cells[row * self.size + col]
    }

    pub fn in_range(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Puts `mark` on an empty cell.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), InvalidMove> {
        if !self.in_range(row, col) {
            return Err(InvalidMove::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        let idx = row * self.size + col;
        match self.cells[idx] {
            Cell::Empty => {
                self.cells[idx] = Cell::Filled(mark);
                Ok(())
            }
            Cell::Filled(_) => Err(InvalidMove::Occupied { row, col }),
        }
    }

    /// Empties a cell. Out-of-range coordinates are ignored.
    pub fn clear(&mut self, row: usize, col: usize) {
        if self.in_range(row, col) {
            self.cells[row * self.size + col] = Cell::Empty;
        }
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Cell::Empty)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Empty).count()
    }

    /// Empty cells in row-major order.
    pub fn available_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == Cell::Empty)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    /// Tentatively puts `mark` on an empty cell. The cell is emptied again
    /// when the returned guard goes out of scope.
    pub fn place_scoped(
        &mut self,
        row: usize,
        col: usize,
        mark: Mark,
    ) -> Result<Placement<'_>, InvalidMove> {
        self.place(row, col, mark)?;
        Ok(Placement {
            board: self,
            row,
            col,
        })
    }

    /// [`place_scoped`](Self::place_scoped) for cells taken from
    /// [`available_cells`](Self::available_cells).
    pub(crate) fn place_on_empty(&mut self, row: usize, col: usize, mark: Mark) -> Placement<'_> {
        debug_assert_eq!(self.get(row, col), Cell::Empty, "cell is already taken");
        self.cells[row * self.size + col] = Cell::Filled(mark);
        Placement {
            board: self,
            row,
            col,
        }
    }
}

/// A placement that is undone on drop, so search code can't leak a mark
/// through an early `break` or `return`.
pub struct Placement<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.clear(self.row, self.col);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::Filled(Mark::X) => "X",
                    Cell::Filled(Mark::O) => "O",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a board from rows of `X`, `O` and `.`/`_`.
#[cfg(test)]
pub(crate) fn board_from_rows(rows: &[&str]) -> Board {
    let size = rows.len();
    let mut board = Board::with_win_length(size, size);
    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
            match ch {
                'X' => board.place(row, col, Mark::X).unwrap(),
                'O' => board.place(row, col, Mark::O).unwrap(),
                _ => {}
            }
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let board = Board::new(BoardSize::Three);
        assert_eq!(board.size(), 3);
        assert_eq!(board.win_length(), 3);
        assert!(board.is_empty());
        assert_eq!(board.available_cells().len(), 9);

        let board = Board::new(BoardSize::Four);
        assert_eq!(board.win_length(), 4);
        assert_eq!(board.empty_count(), 16);
    }

    #[test]
    fn test_place() {
        let mut board = Board::new(BoardSize::Three);
        assert!(board.place(0, 0, Mark::X).is_ok());
        assert_eq!(board.get(0, 0), Cell::Filled(Mark::X));

        assert_eq!(
            board.place(0, 0, Mark::O),
            Err(InvalidMove::Occupied { row: 0, col: 0 })
        );
        assert_eq!(board.get(0, 0), Cell::Filled(Mark::X));

        assert_eq!(
            board.place(3, 1, Mark::O),
            Err(InvalidMove::OutOfRange {
                row: 3,
                col: 1,
                size: 3
            })
        );
    }

    #[test]
    fn test_available_cells_row_major() {
        let board = board_from_rows(&["X.O", "...", "O.X"]);
        assert_eq!(
            board.available_cells(),
            vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]
        );
    }

    #[test]
    fn test_available_plus_occupied_is_area() {
        let mut board = Board::new(BoardSize::Four);
        let moves = [(0, 0), (3, 3), (1, 2), (2, 1), (0, 3)];
        for (i, &(row, col)) in moves.iter().enumerate() {
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            board.place(row, col, mark).unwrap();
            let occupied = 16 - board.empty_count();
            assert_eq!(occupied, i + 1);
            assert_eq!(board.available_cells().len() + occupied, 16);
        }
    }

    #[test]
    fn test_clear_only_touches_its_cell() {
        let mut board = board_from_rows(&["XO.", ".X.", "..O"]);
        let before = board.clone();
        board.place(1, 0, Mark::O).unwrap();
        board.clear(1, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full() {
        let board = board_from_rows(&["XOX", "XOO", "OXX"]);
        assert!(board.is_full());
        assert!(board.available_cells().is_empty());

        let mut board = board;
        board.reset();
        assert!(board.is_empty());
    }

    #[test]
    fn test_scoped_placement_restores_on_drop() {
        let mut board = board_from_rows(&["X..", "...", "..."]);
        let before = board.clone();
        {
            let mut placed = board.place_scoped(1, 1, Mark::O).unwrap();
            assert_eq!(placed.get(1, 1), Cell::Filled(Mark::O));
            let inner = placed.place_on_empty(2, 2, Mark::X);
            assert_eq!(inner.empty_count(), 6);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_scoped_placement_rejects_taken_cell() {
        let mut board = board_from_rows(&["X..", "...", "..."]);
        let before = board.clone();
        assert_eq!(
            board.place_scoped(0, 0, Mark::O).err(),
            Some(InvalidMove::Occupied { row: 0, col: 0 })
        );
        assert_eq!(
            board.place_scoped(3, 0, Mark::O).err(),
            Some(InvalidMove::OutOfRange {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert_eq!(board.get(0, 0), Cell::Filled(Mark::X));
        assert_eq!(board, before);
    }

    #[test]
    fn test_display() {
        let board = board_from_rows(&["X.O", "...", "..."]);
        assert_eq!(board.to_string(), "X . O \n. . . \n. . . \n");
    }
}
