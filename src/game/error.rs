use thiserror::Error;

/// Configuration problems that abort game (or autoplayer) creation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board size must be at least {min}, got {size}")]
    BoardTooSmall { size: usize, min: usize },

    #[error("initial body length must be in [1, {max}] for a {size}x{size} board, got {length}")]
    BodyLengthOutOfRange {
        length: usize,
        max: usize,
        size: usize,
    },

    #[error("autoplay needs an even board size, got {size}")]
    OddBoard { size: usize },

    #[error("autoplayer built for a {expected}x{expected} board was given a {found}x{found} board")]
    BoardSizeMismatch { expected: usize, found: usize },
}
