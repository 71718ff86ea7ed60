//! Tic-tac-toe on 3x3 and 4x4 boards against a human or a computer opponent.
//!
//! The crate is the decision core only: board state, win and draw detection,
//! and the AI. A front-end drives it through [`MatchSession`] (or the free
//! functions in [`session`]) and draws whatever it likes.
//!
//! ```
//! use tictactoe_ai::{AiPolicy, BoardSize, Difficulty, MatchSession, MatchStatus};
//!
//! let mut session = MatchSession::new(BoardSize::Three);
//! let mut ai = AiPolicy::seeded(Difficulty::Hard, 0);
//!
//! session.apply_move(0, 0)?;
//! session.play_ai_move(&mut ai)?;
//! assert_eq!(session.status(), MatchStatus::Continuing);
//! # Ok::<(), tictactoe_ai::InvalidMove>(())
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod policy;
pub mod search;
pub mod session;
pub mod win;

pub use board::{Board, BoardSize, Cell, Mark};
pub use config::{DepthTable, HeuristicWeights, PolicyConfig, SearchConfig};
pub use error::InvalidMove;
pub use policy::{request_ai_move, AiPolicy, Difficulty};
pub use search::{SearchResult, Searcher};
pub use session::{MatchSession, MatchStatus, Move, Tally};
