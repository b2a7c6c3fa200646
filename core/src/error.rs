use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Maze needs at least 3 rows and 3 columns with an opening on each end, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared layout")]
    InvalidBoardShape,
    #[error("Maze already solved, no new moves are accepted")]
    AlreadySolved,
    #[error("Maze not solved yet, cannot advance to the next level")]
    NotSolved,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure while loading a [`SessionConfig`](crate::SessionConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not parse session config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid session config: {0}")]
    Invalid(#[from] GameError),
}
