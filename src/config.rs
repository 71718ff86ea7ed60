//! Tunable constants for evaluation, search and the AI policies.

use crate::board::BoardSize;

/// Weights of the positional estimate used when a depth-limited search
/// stops before the game is decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    /// A line one mark short of a win.
    pub one_away: f64,
    /// A line two marks short of a win.
    pub two_away: f64,
    /// Per mark in any other open line.
    pub per_mark: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            one_away: 0.5,
            two_away: 0.2,
            per_mark: 0.05,
        }
    }
}

/// Maps the number of empty cells to a search depth. More empties, shallower search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthTable {
    /// `(threshold, depth)` pairs in descending threshold order.
    steps: Vec<(usize, u32)>,
    fallback: u32,
}

impl DepthTable {
    pub fn new(mut steps: Vec<(usize, u32)>, fallback: u32) -> Self {
        steps.sort_by(|a, b| b.0.cmp(&a.0));
        Self { steps, fallback }
    }

    /// A table that always searches `depth` plies.
    pub fn fixed(depth: u32) -> Self {
        Self::new(Vec::new(), depth)
    }

    /// Depth of the first step whose threshold `empties` exceeds, else the fallback.
    pub fn depth_for(&self, empties: usize) -> u32 {
        self.steps
            .iter()
            .find(|&&(threshold, _)| empties > threshold)
            .map_or(self.fallback, |&(_, depth)| depth)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub depth_table: DepthTable,
    /// The constant K: a win found `d` plies from the root scores `K - d`, a loss `d - K`.
    pub win_bias: f64,
    pub weights: HeuristicWeights,
}

impl SearchConfig {
    pub fn for_size(size: BoardSize) -> Self {
        match size {
            BoardSize::Three => Self {
                depth_table: DepthTable::fixed(15),
                win_bias: 10.0,
                weights: HeuristicWeights::default(),
            },
            // K exceeds the deepest possible ply so every win stays positive,
            // and every win outranks the largest heuristic value.
            BoardSize::Four => Self {
                depth_table: DepthTable::new(vec![(12, 4), (8, 5), (4, 6)], 10),
                win_bias: 17.0,
                weights: HeuristicWeights::default(),
            },
        }
    }

    /// Sizes other than 3 and 4 get the larger board's settings.
    pub fn for_side(side: usize) -> Self {
        if side <= 3 {
            Self::for_size(BoardSize::Three)
        } else {
            Self {
                win_bias: (side * side + 1) as f64,
                ..Self::for_size(BoardSize::Four)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    /// Chance that Medium looks for a win-now or block-now move before playing randomly.
    pub medium_shortcut_probability: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            medium_shortcut_probability: 0.6,
        }
    }
}
