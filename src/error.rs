use thiserror::Error;

use crate::board::Point;

/// Errors surfaced by the engine.
///
/// Unreachable targets and a full board are regular game outcomes, not
/// errors; see [`Outcome`](crate::game::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinesError {
    #[error("coordinate ({x},{y}) is outside a {size}x{size} board")]
    MalformedCoordinate { x: usize, y: usize, size: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    #[error("cell {0} is not empty")]
    NotEmpty(Point),
    #[error("cell {0} holds no ball")]
    NotOccupied(Point),
}
