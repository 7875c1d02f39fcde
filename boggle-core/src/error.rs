use thiserror::Error;

/// Everything that can go wrong parsing boards, board classes, and
/// dictionaries, plus the small set of invariant violations that are
/// programmer errors rather than recoverable input problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoggleError {
    #[error("invalid letter '{0}' (expected a..z or '.')")]
    InvalidLetter(char),

    #[error("board has {got} cells, expected {expected}")]
    WrongCellCount { expected: usize, got: usize },

    #[error("cell {0} has no candidate letters")]
    EmptyCell(usize),

    #[error("cell {cell} has {count} candidate letters, at most 26 are possible")]
    OversizeCell { cell: usize, count: usize },

    #[error("board string has length {got}, expected {expected}")]
    WrongBoardLength { expected: usize, got: usize },

    #[error("dictionary word '{0}' contains a character outside a..z")]
    InvalidDictionaryWord(String),

    /// Resetting an [`crate::arena::EvalNodeArena`] to a watermark that was
    /// never saved on it. Always a bug in the caller, never a consequence of
    /// bad input, so callers should treat this as unrecoverable.
    #[error("arena watermark {0} does not belong to this arena")]
    ArenaExhausted(usize),
}
