//! Move selection per difficulty level.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Mark};
use crate::config::{PolicyConfig, SearchConfig};
use crate::search::{shortcut_move, Searcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Any empty cell.
    Easy,
    /// Usually takes an obvious win or block, otherwise random.
    Medium,
    /// Full search.
    Hard,
}

/// Picks moves for one difficulty. Owns its random source so games can be replayed from a seed.
pub struct AiPolicy {
    difficulty: Difficulty,
    rng: StdRng,
    config: PolicyConfig,
    search: Option<SearchConfig>,
}

impl AiPolicy {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            difficulty,
            rng,
            config: PolicyConfig::default(),
            search: None,
        }
    }

    /// Probabilities outside `[0, 1]` are clamped into it. NaN counts as 0.
    pub fn with_config(mut self, config: PolicyConfig) -> Self {
        let p = config.medium_shortcut_probability;
        self.config = PolicyConfig {
            medium_shortcut_probability: if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) },
        };
        self
    }

    /// Overrides the search settings Hard would otherwise derive from the board size.
    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = Some(search);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// A move for `ai`, or `None` if the board is full. The board is left as it was found.
    pub fn choose_move(&mut self, board: &mut Board, ai: Mark) -> Option<(usize, usize)> {
        match self.difficulty {
            Difficulty::Easy => self.random_move(board),
            Difficulty::Medium => {
                if self.rng.gen_bool(self.config.medium_shortcut_probability) {
                    debug!("medium: looking for a win or block");
                    shortcut_move(board, ai).or_else(|| self.random_move(board))
                } else {
                    debug!("medium: playing randomly");
                    self.random_move(board)
                }
            }
            Difficulty::Hard => {
                let config = self
                    .search
                    .clone()
                    .unwrap_or_else(|| SearchConfig::for_side(board.size()));
                Searcher::new(ai, config).choose_best_move(board).best_move
            }
        }
    }

    fn random_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        board.available_cells().choose(&mut self.rng).copied()
    }
}

/// One-off move request with an unseeded policy.
pub fn request_ai_move(
    board: &mut Board,
    ai: Mark,
    difficulty: Difficulty,
) -> Option<(usize, usize)> {
    AiPolicy::new(difficulty).choose_move(board, ai)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{board_from_rows, BoardSize, Cell};

    fn always_shortcut() -> PolicyConfig {
        PolicyConfig {
            medium_shortcut_probability: 1.0,
        }
    }

    #[test]
    fn test_easy_picks_an_empty_cell() {
        let mut board = board_from_rows(&["XO.", "OX.", "X.O"]);
        let mut policy = AiPolicy::seeded(Difficulty::Easy, 1);
        for _ in 0..20 {
            let (row, col) = policy.choose_move(&mut board, Mark::O).unwrap();
            assert_eq!(board.get(row, col), Cell::Empty);
        }
    }

    #[test]
    fn test_seed_replays_the_same_moves() {
        let mut board = Board::new(BoardSize::Four);
        let mut a = AiPolicy::seeded(Difficulty::Easy, 42);
        let mut b = AiPolicy::seeded(Difficulty::Easy, 42);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&mut board, Mark::O),
                b.choose_move(&mut board, Mark::O)
            );
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = board_from_rows(&["XOX", "XOO", "OXX"]);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut policy = AiPolicy::seeded(difficulty, 3).with_config(always_shortcut());
            assert_eq!(policy.choose_move(&mut board, Mark::O), None);
        }
    }

    #[test]
    fn test_medium_shortcuts() {
        let mut policy = AiPolicy::seeded(Difficulty::Medium, 5).with_config(always_shortcut());

        let mut board = board_from_rows(&["XX.", "OO.", "..."]);
        assert_eq!(policy.choose_move(&mut board, Mark::O), Some((1, 2)));

        let mut board = board_from_rows(&["XX.", ".O.", "..."]);
        assert_eq!(policy.choose_move(&mut board, Mark::O), Some((0, 2)));

        // Nothing obvious: falls back to a random empty cell.
        let mut board = board_from_rows(&["X..", ".O.", "..."]);
        let (row, col) = policy.choose_move(&mut board, Mark::O).unwrap();
        assert_eq!(board.get(row, col), Cell::Empty);
    }

    #[test]
    fn test_medium_blocks_most_of_the_time() {
        let mut board = board_from_rows(&["XX.", ".O.", "..."]);
        let mut policy = AiPolicy::seeded(Difficulty::Medium, 11);
        let trials = 400;
        let blocks = (0..trials)
            .filter(|_| policy.choose_move(&mut board, Mark::O) == Some((0, 2)))
            .count();
        // 0.6 from the shortcut plus 0.4 / 6 from random play.
        let rate = blocks as f64 / trials as f64;
        assert!(rate > 0.55 && rate < 0.8, "block rate {rate}");
    }

    #[test]
    fn test_medium_without_shortcuts_is_random() {
        let mut board = board_from_rows(&["XX.", ".O.", "..."]);
        let mut policy = AiPolicy::seeded(Difficulty::Medium, 2).with_config(PolicyConfig {
            medium_shortcut_probability: 0.0,
        });
        let blocks = (0..300)
            .filter(|_| policy.choose_move(&mut board, Mark::O) == Some((0, 2)))
            .count();
        assert!(blocks < 100, "{blocks} blocks");
    }

    #[test]
    fn test_medium_probability_is_clamped() {
        let mut board = board_from_rows(&["XX.", ".O.", "..."]);

        let mut policy = AiPolicy::seeded(Difficulty::Medium, 4).with_config(PolicyConfig {
            medium_shortcut_probability: 1.5,
        });
        for _ in 0..20 {
            assert_eq!(policy.choose_move(&mut board, Mark::O), Some((0, 2)));
        }

        for p in [-0.3, f64::NAN] {
            let mut policy = AiPolicy::seeded(Difficulty::Medium, 4).with_config(PolicyConfig {
                medium_shortcut_probability: p,
            });
            let blocks = (0..300)
                .filter(|_| policy.choose_move(&mut board, Mark::O) == Some((0, 2)))
                .count();
            assert!(blocks < 100, "{blocks} blocks with probability {p}");
        }
    }

    #[test]
    fn test_hard_uses_search() {
        let mut board = board_from_rows(&["XO.", ".X.", "..."]);
        let before = board.clone();
        let mut policy = AiPolicy::seeded(Difficulty::Hard, 0);
        assert_eq!(policy.choose_move(&mut board, Mark::O), Some((2, 2)));
        assert_eq!(board, before);

        assert_eq!(
            request_ai_move(&mut board, Mark::O, Difficulty::Hard),
            Some((2, 2))
        );
    }
}
