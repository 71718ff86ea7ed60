//! Minimax search with alpha-beta pruning.
//!
//! The search walks the tree depth-first on a single board, placing a mark
//! before each recursive call and removing it afterwards. Placements go
//! through a [`Placement`](crate::board::Placement) guard that clears the
//! cell on every exit path, so the board a caller passes in is unchanged when the search returns.
//!
//! Large boards are searched to a depth picked from the number of empty
//! cells (see [`DepthTable`](crate::config::DepthTable)); positions where the
//! depth runs out are scored with [`heuristic`].

use log::{debug, trace};

use crate::board::{Board, Mark};
use crate::config::SearchConfig;
use crate::eval::{heuristic, terminal_score};
use crate::win::has_win;

const INF: f64 = f64::INFINITY;

/// Outcome of one top-level search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// `None` when the board has no move left to make.
    pub best_move: Option<(usize, usize)>,
    pub score: f64,
    /// Positions visited.
    pub nodes: u64,
}

pub struct Searcher {
    ai: Mark,
    config: SearchConfig,
    nodes: u64,
}

impl Searcher {
    /// A searcher maximizing for `ai`.
    pub fn new(ai: Mark, config: SearchConfig) -> Self {
        Self {
            ai,
            config,
            nodes: 0,
        }
    }

    pub fn ai(&self) -> Mark {
        self.ai
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Picks the AI's move: win now, else block now, else the best searched move.
    pub fn choose_best_move(&mut self, board: &mut Board) -> SearchResult {
        if let Some(pos) = winning_move(board, self.ai) {
            trace!("{} wins at {:?}", self.ai, pos);
            return SearchResult {
                best_move: Some(pos),
                score: self.config.win_bias - 1.0,
                nodes: 0,
            };
        }
        if let Some(pos) = winning_move(board, self.ai.opponent()) {
            trace!("{} blocks at {:?}", self.ai, pos);
            return SearchResult {
                best_move: Some(pos),
                score: 0.0,
                nodes: 0,
            };
        }
        self.search_root(board)
    }

    /// Searches every candidate move, center first, then corners, then the rest.
    ///
    /// Alpha carries over from one candidate to the next. Ties go to the
    /// earlier candidate.
    pub fn search_root(&mut self, board: &mut Board) -> SearchResult {
        self.nodes = 0;

        if let Some(score) = terminal_score(board, self.ai) {
            return SearchResult {
                best_move: None,
                score: self.scale(score, 0),
                nodes: 1,
            };
        }

        let depth = self.config.depth_table.depth_for(board.empty_count());
        let mut alpha = -INF;
        let beta = INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for (row, col) in ordered_moves(board) {
            let score = {
                let mut placed = board.place_on_empty(row, col, self.ai);
                self.minimax(&mut placed, false, alpha, beta, depth.saturating_sub(1), 1)
            };
            trace!("({}, {}) scores {}", row, col, score);

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some((row, col));
            }
            alpha = alpha.max(score);
        }

        debug!(
            "{} plays {:?} (score {}, depth {}, {} nodes)",
            self.ai, best_move, best_score, depth, self.nodes
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }

    /// Minimax value of `board` for the AI, with `maximizing` telling whether
    /// the AI is the side to move.
    pub fn search(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        alpha: f64,
        beta: f64,
        depth_remaining: u32,
    ) -> f64 {
        self.minimax(board, maximizing, alpha, beta, depth_remaining, 0)
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
        depth_remaining: u32,
        ply: u32,
    ) -> f64 {
        self.nodes += 1;

        // A full board is always terminal.
        if let Some(score) = terminal_score(board, self.ai) {
            return self.scale(score, ply);
        }
        if depth_remaining == 0 {
            return heuristic(board, self.ai, &self.config.weights);
        }

        let mark = if maximizing {
            self.ai
        } else {
            self.ai.opponent()
        };
        let mut best = if maximizing { -INF } else { INF };

        for (row, col) in board.available_cells() {
            let score = {
                let mut placed = board.place_on_empty(row, col, mark);
                self.minimax(&mut placed, !maximizing, alpha, beta, depth_remaining - 1, ply + 1)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Wins found sooner and losses found later score higher.
    fn scale(&self, score: i32, ply: u32) -> f64 {
        let k = self.config.win_bias;
        let ply = f64::from(ply);
        match score.signum() {
            1 => k - ply,
            -1 => ply - k,
            _ => 0.0,
        }
    }
}

/// First empty cell, in row-major order, that completes a line for `mark`.
pub fn winning_move(board: &mut Board, mark: Mark) -> Option<(usize, usize)> {
    board
        .available_cells()
        .into_iter()
        .find(|&(row, col)| has_win(&board.place_on_empty(row, col, mark), mark))
}

/// Win-now for `ai`, else block-now against its opponent.
pub fn shortcut_move(board: &mut Board, ai: Mark) -> Option<(usize, usize)> {
    winning_move(board, ai).or_else(|| winning_move(board, ai.opponent()))
}

/// Empty cells with the center first, then the corners, then the rest in row-major order.
pub fn ordered_moves(board: &Board) -> Vec<(usize, usize)> {
    let size = board.size();
    let middle = |i: usize| (2 * i + 1).abs_diff(size) <= 1;
    let edge = |i: usize| i == 0 || i == size - 1;
    let priority = |&(row, col): &(usize, usize)| {
        if middle(row) && middle(col) {
            0
        } else if edge(row) && edge(col) {
            1
        } else {
            2
        }
    };

    let mut moves = board.available_cells();
    moves.sort_by_key(priority);
    moves
}
