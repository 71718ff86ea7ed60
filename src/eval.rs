//! Position scoring from the AI's point of view.

use crate::board::{Board, Mark};
use crate::config::HeuristicWeights;
use crate::win::{has_win, windows};

/// `+1` if `ai` has a line, `-1` if its opponent has one, `0` for a full
/// board with no line, `None` while the game is still open.
pub fn terminal_score(board: &Board, ai: Mark) -> Option<i32> {
    if has_win(board, ai) {
        Some(1)
    } else if has_win(board, ai.opponent()) {
        Some(-1)
    } else if board.is_full() {
        Some(0)
    } else {
        None
    }
}

/// Zero-sum estimate of an undecided position. Lines holding both marks are dead;
/// every other line is worth more the closer its owner is to completing it.
pub fn heuristic(board: &Board, ai: Mark, weights: &HeuristicWeights) -> f64 {
    let win_length = board.win_length();
    let line_value = |marks: usize| match win_length - marks {
        1 => weights.one_away,
        2 => weights.two_away,
        _ => weights.per_mark * marks as f64,
    };

    windows(board.size(), win_length)
        .map(|window| {
            let ours = window.count(board, ai);
            let theirs = window.count(board, ai.opponent());
            match (ours, theirs) {
                (0, 0) => 0.0,
                (n, 0) => line_value(n),
                (0, n) => -line_value(n),
                _ => 0.0,
            }
        })
        .sum()
}
