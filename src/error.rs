//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by engine construction, coordinate checks and storage.
///
/// Gameplay itself never fails: operations on a finished game are no-ops,
/// and storage failures are swallowed by [`ScoreBook`](crate::scores::ScoreBook).
#[derive(Debug, Error)]
pub enum ArcadeError {
    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A hand-built board or grid breaks an invariant.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// A cell coordinate outside the board.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A linear index outside `0..len`.
    #[error("index {index} is outside 0..{len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A score store or leaderboard backend refused the request.
    #[error("score store unavailable: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ArcadeError>;
