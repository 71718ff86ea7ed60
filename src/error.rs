use thiserror::Error;

/// A move the core refused to apply.
///
/// Always a caller bug: the front-end offered a cell it should not have.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error("the match is already over")]
    MatchOver,
}
