//! A match as seen by a front-end: board, turn order, history and running tallies.

use std::fmt;

use log::info;

use crate::board::{Board, BoardSize, Mark};
use crate::error::InvalidMove;
use crate::policy::AiPolicy;
use crate::win::{winner, winning_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Continuing,
    Won(Mark),
    Drawn,
}

impl MatchStatus {
    pub fn is_over(self) -> bool {
        self != MatchStatus::Continuing
    }
}

/// A recorded placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
}

/// Results across every match played in a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, status: MatchStatus) {
        match status {
            MatchStatus::Won(Mark::X) => self.x_wins += 1,
            MatchStatus::Won(Mark::O) => self.o_wins += 1,
            MatchStatus::Drawn => self.draws += 1,
            MatchStatus::Continuing => {}
        }
    }

    fn unrecord(&mut self, status: MatchStatus) {
        match status {
            MatchStatus::Won(Mark::X) => self.x_wins = self.x_wins.saturating_sub(1),
            MatchStatus::Won(Mark::O) => self.o_wins = self.o_wins.saturating_sub(1),
            MatchStatus::Drawn => self.draws = self.draws.saturating_sub(1),
            MatchStatus::Continuing => {}
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "X wins: {}   O wins: {}   Draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}

pub fn new_match(size: BoardSize) -> Board {
    Board::new(size)
}

pub fn status_of(board: &Board) -> MatchStatus {
    match winner(board) {
        Some(mark) => MatchStatus::Won(mark),
        None if board.is_full() => MatchStatus::Drawn,
        None => MatchStatus::Continuing,
    }
}

/// Places `mark` and reports where the match stands.
pub fn apply_human_move(
    board: &mut Board,
    row: usize,
    col: usize,
    mark: Mark,
) -> Result<MatchStatus, InvalidMove> {
    board.place(row, col, mark)?;
    Ok(status_of(board))
}

/// Takes back up to `count` moves, newest first. Returns how many were undone.
pub fn undo_last_moves(board: &mut Board, history: &mut Vec<Move>, count: usize) -> usize {
    let keep = history.len().saturating_sub(count);
    let undone = history.len() - keep;
    for mv in history.drain(keep..).rev() {
        board.clear(mv.row, mv.col);
    }
    undone
}

/// Owns the board for one run of matches. X always moves first.
#[derive(Debug, Clone)]
pub struct MatchSession {
    board: Board,
    history: Vec<Move>,
    to_move: Mark,
    status: MatchStatus,
    tally: Tally,
}

impl MatchSession {
    pub fn new(size: BoardSize) -> Self {
        Self::with_board(new_match(size))
    }

    /// Starts from an empty board of any shape.
    pub fn with_board(mut board: Board) -> Self {
        board.reset();
        Self {
            board,
            history: Vec::new(),
            to_move: Mark::X,
            status: MatchStatus::Continuing,
            tally: Tally::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Cells of the winning line, once someone has won.
    pub fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
        match self.status {
            MatchStatus::Won(mark) => winning_line(&self.board, mark),
            _ => None,
        }
    }

    /// Places the side to move's mark at `(row, col)`.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<MatchStatus, InvalidMove> {
        if self.status.is_over() {
            return Err(InvalidMove::MatchOver);
        }
        let mark = self.to_move;
        let status = apply_human_move(&mut self.board, row, col, mark)?;
        self.history.push(Move { row, col, mark });
        self.status = status;

        if status.is_over() {
            self.tally.record(status);
            info!("match over: {:?} ({})", status, self.tally);
        } else {
            self.to_move = mark.opponent();
        }
        Ok(status)
    }

    /// The move `policy` would make for the side to move. Nothing is placed.
    pub fn request_ai_move(&mut self, policy: &mut AiPolicy) -> Option<(usize, usize)> {
        if self.status.is_over() {
            return None;
        }
        policy.choose_move(&mut self.board, self.to_move)
    }

    /// Lets `policy` move for the side to move.
    pub fn play_ai_move(&mut self, policy: &mut AiPolicy) -> Result<MatchStatus, InvalidMove> {
        let (row, col) = self
            .request_ai_move(policy)
            .ok_or(InvalidMove::MatchOver)?;
        self.apply_move(row, col)
    }

    /// Takes back up to `count` moves. A finished match becomes live again
    /// and its result comes off the tally.
    pub fn undo(&mut self, count: usize) -> usize {
        let undone = undo_last_moves(&mut self.board, &mut self.history, count);
        let previous = self.status;
        self.to_move = self.history.last().map_or(Mark::X, |mv| mv.mark.opponent());
        self.status = status_of(&self.board);
        if previous.is_over() && !self.status.is_over() {
            self.tally.unrecord(previous);
        }
        undone
    }

    /// Clears the board for a new match. The tally carries over.
    pub fn reset(&mut self) {
        self.board.reset();
        self.history.clear();
        self.to_move = Mark::X;
        self.status = MatchStatus::Continuing;
    }
}

impl fmt::Display for MatchSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
