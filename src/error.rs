//! Errors

use thiserror::Error;

/// Failures when building a maze
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Both dimensions must be at least one cell
    #[error("invalid maze dimensions {rows}x{cols}, both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },
}
